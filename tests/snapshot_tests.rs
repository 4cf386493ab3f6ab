//! Snapshot tests for assembled panels.
//!
//! Each snapshot lists every row with its enabled state and shown value, so
//! binding changes show up as a readable diff.

use gl_style_editor::config::default_store;
use gl_style_editor::panel::{Gesture, Panel, PanelKind, assemble_all};
use gl_style_editor::params::ParameterStore;

fn summarize(panels: &[Panel]) -> String {
    panels
        .iter()
        .map(Panel::summary)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Apply gestures to a freshly assembled panel, writing each result back.
fn edit(store: &mut ParameterStore, kind: PanelKind, gestures: &[(usize, Gesture)]) {
    let mut panel = Panel::assemble(kind, store).unwrap();
    for (row, gesture) in gestures {
        if let Some(update) = panel.apply(*row, gesture.clone()) {
            store.update_params(&update);
        }
    }
}

#[test]
fn snapshot_default_panels() {
    let panels = assemble_all(&default_store()).unwrap();
    insta::assert_snapshot!("default_panels", summarize(&panels));
}

#[test]
fn snapshot_edited_panels() {
    let mut store = default_store();
    edit(
        &mut store,
        PanelKind::Rectangle,
        &[
            (0, Gesture::Toggle),
            (1, Gesture::Page(1)),
            (3, Gesture::Step(1)),
            (4, Gesture::Toggle),
        ],
    );
    edit(
        &mut store,
        PanelKind::Labels,
        &[(1, Gesture::Step(-2)), (2, Gesture::Pick("#d62728".into()))],
    );

    let panels = vec![
        Panel::assemble(PanelKind::Rectangle, &store).unwrap(),
        Panel::assemble(PanelKind::Labels, &store).unwrap(),
    ];
    insta::assert_snapshot!("edited_panels", summarize(&panels));
}
