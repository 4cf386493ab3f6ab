//! Application model for the TUI.

use tuirealm::Update;

use crate::panel::PanelKind;
use crate::params::ParameterStore;

use super::activities::Msg;

/// State that outlives activity switches.
pub struct Model {
    /// The store every control writes through.
    pub store: ParameterStore,
    /// Bumped on every figure refresh.
    pub revision: u64,
    pub active_tab: usize,

    // UI state
    pub quit: bool,
    pub show_help: bool,
    pub message: Option<String>,
}

impl Model {
    pub fn new(store: ParameterStore) -> Self {
        Self {
            store,
            revision: 0,
            active_tab: 0,
            quit: false,
            show_help: false,
            message: None,
        }
    }

    pub fn active_kind(&self) -> PanelKind {
        PanelKind::ALL[self.active_tab % PanelKind::ALL.len()]
    }

    /// Refresh hook run after every store write.
    pub fn update_figure(&mut self) {
        self.revision += 1;
        tracing::debug!(revision = self.revision, "figure refreshed");
    }
}

impl Update<Msg> for Model {
    fn update(&mut self, msg: Option<Msg>) -> Option<Msg> {
        let msg = msg?;

        match msg {
            Msg::Quit => {
                self.quit = true;
                None
            }
            Msg::ShowHelp => {
                self.show_help = true;
                None
            }
            Msg::HideHelp => {
                self.show_help = false;
                None
            }
            Msg::NextTab => {
                self.active_tab = (self.active_tab + 1) % PanelKind::ALL.len();
                None
            }
            Msg::PrevTab => {
                let len = PanelKind::ALL.len();
                self.active_tab = (self.active_tab + len - 1) % len;
                None
            }

            Msg::ParamChanged(update) => {
                self.store.update_params(&update);
                self.message = None;
                Some(Msg::Redraw)
            }
            Msg::Redraw => {
                self.update_figure();
                None
            }

            Msg::Status(text) => {
                self.message = Some(text);
                None
            }

            Msg::SwitchToStoreView => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_store;
    use crate::params::{ParamPath, ParamUpdate, Value};

    fn drain(model: &mut Model, msg: Msg) {
        let mut current = Some(msg);
        while let Some(m) = current {
            current = model.update(Some(m));
        }
    }

    #[test]
    fn param_change_writes_store_then_redraws_once() {
        let mut model = Model::new(default_store());
        let update = ParamUpdate::single(&ParamPath::new("Circle", "line_width"), Value::Int(4));

        assert!(matches!(
            model.update(Some(Msg::ParamChanged(update.clone()))),
            Some(Msg::Redraw)
        ));
        assert_eq!(model.store.get("Circle", "line_width"), Some(&Value::Int(4)));
        assert_eq!(model.revision, 0);

        drain(&mut model, Msg::ParamChanged(update));
        assert_eq!(model.revision, 1);
    }

    #[test]
    fn tabs_wrap_both_ways() {
        let mut model = Model::new(default_store());
        drain(&mut model, Msg::PrevTab);
        assert_eq!(model.active_kind(), PanelKind::Labels);
        drain(&mut model, Msg::NextTab);
        assert_eq!(model.active_kind(), PanelKind::Circle);
    }
}
