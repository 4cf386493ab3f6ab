use approx::assert_relative_eq;
use gl_style_editor::config::default_store;
use gl_style_editor::controls::{BindingError, Control};
use gl_style_editor::panel::{Gesture, Panel, PanelKind, Row, assemble_all};
use gl_style_editor::params::{ParameterStore, Value};

fn rectangle(store: &ParameterStore) -> Panel {
    Panel::assemble(PanelKind::Rectangle, store).unwrap()
}

fn circle(store: &ParameterStore) -> Panel {
    Panel::assemble(PanelKind::Circle, store).unwrap()
}

#[test]
fn test_default_store_assembles_every_tab() {
    let panels = assemble_all(&default_store()).unwrap();
    let kinds: Vec<_> = panels.iter().map(Panel::kind).collect();
    assert_eq!(
        kinds,
        vec![PanelKind::Circle, PanelKind::Rectangle, PanelKind::Labels]
    );
    assert_eq!(panels[0].len(), 5);
    assert_eq!(panels[2].len(), 3);
}

#[test]
fn test_fill_opacity_slider_position_follows_store() {
    let panel = circle(&default_store());
    let Some(Row::Slider(slider)) = panel.row(1) else {
        panic!("row 1 should be the fill opacity slider");
    };
    assert_eq!(slider.label(), "Fill Opacity");
    assert_eq!(slider.position(), 20);
    assert_relative_eq!(slider.value().as_f64().unwrap(), 0.2);
}

#[test]
fn test_slider_page_writes_scaled_value() {
    let mut store = default_store();
    let mut panel = rectangle(&store);

    let update = panel.apply(1, Gesture::Page(1)).unwrap();
    assert_eq!(update.section, "Rectangle");
    assert_eq!(update.fields, vec!["fill_alpha".to_string()]);
    assert_relative_eq!(update.value.as_f64().unwrap(), 0.55);

    store.update_params(&update);
    assert_relative_eq!(
        store.get("Rectangle", "fill_alpha").unwrap().as_f64().unwrap(),
        0.55
    );
}

#[test]
fn test_slider_clamps_at_range_end() {
    let store = default_store().with("Circle", "fill_alpha", 1.0);
    let mut panel = circle(&store);
    assert!(panel.apply(1, Gesture::Step(1)).is_none());
    assert!(panel.apply(1, Gesture::Step(-1)).is_some());
}

#[test]
fn test_line_width_writes_integers() {
    let mut panel = circle(&default_store());
    let update = panel.apply(2, Gesture::Step(2)).unwrap();
    assert_eq!(update.value, Value::Int(3));
}

#[test]
fn test_checkbox_toggle_writes_bool() {
    let mut panel = rectangle(&default_store());
    let update = panel.apply(0, Gesture::Toggle).unwrap();
    assert_eq!(update.value, Value::Bool(true));
}

#[test]
fn test_dropdown_writes_stored_codes() {
    let mut panel = circle(&default_store());

    let update = panel.apply(3, Gesture::Step(1)).unwrap();
    assert_eq!(update.value, Value::text("--"));

    let update = panel.apply(3, Gesture::Step(1)).unwrap();
    assert_eq!(update.value, Value::text(":"));

    let update = panel.apply(3, Gesture::Step(-1)).unwrap();
    assert_eq!(update.value, Value::text("--"));
}

#[test]
fn test_unlisted_line_style_fails_assembly() {
    let store = default_store().with("Rectangle", "line_style", "~~");
    let err = Panel::assemble(PanelKind::Rectangle, &store).unwrap_err();
    assert!(matches!(err, BindingError::ValueNotListed { .. }));
    assert!(err.to_string().contains("Rectangle.line_style"));
    assert!(assemble_all(&store).is_err());
}

#[test]
fn test_missing_field_fails_assembly() {
    let store = ParameterStore::new().with("Circle", "fill", true);
    let err = Panel::assemble(PanelKind::Circle, &store).unwrap_err();
    assert!(matches!(err, BindingError::MissingField(_)));
}

#[test]
fn test_bool_in_slider_field_is_type_mismatch() {
    let store = default_store().with("Circle", "fill_alpha", true);
    let err = Panel::assemble(PanelKind::Circle, &store).unwrap_err();
    assert!(matches!(err, BindingError::TypeMismatch { .. }));
}

#[test]
fn test_automatic_color_checks_activator_and_disables_picker() {
    let mut panel = circle(&default_store());
    let Some(Row::ActivatedColor(activator)) = panel.row(4) else {
        panic!("row 4 should be the activated color picker");
    };
    assert!(activator.is_checked());
    assert!(!activator.governed().is_enabled());

    // Disabled picker ignores edits
    assert!(panel.apply(4, Gesture::Text("#00ff00".into())).is_none());
    assert!(panel.apply(4, Gesture::Reset).is_none());

    // Unchecking hands the field back to the picker's current color
    let update = panel.apply(4, Gesture::Toggle).unwrap();
    assert_eq!(update.value, Value::text("#ff0000"));
    assert!(panel.row(4).unwrap().is_enabled());

    // Checking again writes the automatic marker
    let update = panel.apply(4, Gesture::Toggle).unwrap();
    assert_eq!(update.value, Value::automatic());
}

#[test]
fn test_literal_color_leaves_activator_unchecked() {
    let mut panel = rectangle(&default_store());
    let Some(Row::ActivatedColor(activator)) = panel.row(4) else {
        panic!("row 4 should be the activated color picker");
    };
    assert!(!activator.is_checked());
    assert_eq!(activator.governed().color(), "#1f77b4");

    let update = panel.apply(4, Gesture::Pick("#ff7f0e".into())).unwrap();
    assert_eq!(update.value, Value::text("#ff7f0e"));
}

#[test]
fn test_color_text_is_normalized() {
    let mut panel = rectangle(&default_store());
    let update = panel.apply(4, Gesture::Text("red".into())).unwrap();
    assert_eq!(update.value, Value::text("#ff0000"));

    // Garbage is ignored
    assert!(panel.apply(4, Gesture::Text("not a color".into())).is_none());
    assert_eq!(panel.row(4).unwrap().color_picker().unwrap().color(), "#ff0000");
}

#[test]
fn test_color_reset_restores_default() {
    let mut panel = rectangle(&default_store());
    let update = panel.apply(4, Gesture::Reset).unwrap();
    assert_eq!(update.value, Value::text("#ff0000"));
}

#[test]
fn test_labels_tab_controls() {
    let mut panel = Panel::assemble(PanelKind::Labels, &default_store()).unwrap();

    let Some(Row::Options(fonts)) = panel.row(0) else {
        panic!("row 0 should be the font list");
    };
    assert_eq!(fonts.selected(), "DejaVu Sans");

    let update = panel.apply(0, Gesture::Step(1)).unwrap();
    assert_eq!(update.value, Value::text("DejaVu Sans Mono"));

    let update = panel.apply(1, Gesture::Step(2)).unwrap();
    assert_eq!(update.value, Value::Int(12));

    let update = panel.apply(2, Gesture::Reset);
    assert!(update.is_none(), "text color already holds its default");
}

#[test]
fn test_font_size_clamps_to_range() {
    let store = default_store().with("Labels", "font_size", 72_i64);
    let mut panel = Panel::assemble(PanelKind::Labels, &store).unwrap();
    assert!(panel.apply(1, Gesture::Step(1)).is_none());
}

#[test]
fn test_gestures_without_meaning_are_ignored() {
    let mut panel = circle(&default_store());
    assert!(panel.apply(0, Gesture::Step(1)).is_none());
    assert!(panel.apply(1, Gesture::Toggle).is_none());
    assert!(panel.apply(99, Gesture::Toggle).is_none());
}
