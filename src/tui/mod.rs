//! Interactive settings panel.
//!
//! Architecture: Activity-based with tui-realm for components.
//! Each screen (activity) has its own Application instance and message types.

mod activities;
mod activity;
mod clipboard;
mod components;
mod highlighting;
mod model;

use std::io::stdout;
use std::sync::LazyLock;

use color_eyre::eyre::Result;
use crossterm_actions::{
    ActionBinding, ActionConfig, AppEvent, EditingMode, TuiEvent, TuiRealmDispatcher,
    defaults, keys,
};
use ratatui::{
    Terminal,
    crossterm::ExecutableCommand,
    crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
    prelude::CrosstermBackend,
};

use crate::params::ParameterStore;

pub use clipboard::Clipboard;
pub use highlighting::{Highlighter, SYNTAX_SET};
pub use model::Model;

use activities::Msg;
use activity::{ActivityManager, Context};

// ============================================================================
// Event handling (shared across activities)
// ============================================================================

/// Unified application events - wraps TuiEvent + custom actions.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AppAction {
    /// Standard TUI events (navigation, input, selection, app)
    Tui(TuiEvent),
    /// Switch to the parameter store view
    StoreView,
    /// Flip the checkbox or activator under the cursor
    Toggle,
    /// Restore the color picker default
    ResetColor,
    /// Open the preset color dialog
    ColorDialog,
    /// Copy color text to the clipboard
    Copy,
    /// Paste color text from the clipboard
    Paste,
    /// Increment value by small step
    ValueIncrementSmall,
    /// Decrement value by small step
    ValueDecrementSmall,
    /// Increment value by large step
    ValueIncrementLarge,
    /// Decrement value by large step
    ValueDecrementLarge,
}

/// Global dispatcher instance - shared by all components.
pub static DISPATCHER: LazyLock<TuiRealmDispatcher<AppAction>> = LazyLock::new(|| {
    let mut config = ActionConfig::new(EditingMode::Emacs);

    for binding in defaults::emacs_defaults().bindings() {
        config.bind(ActionBinding {
            action: AppAction::Tui(binding.action),
            keys: binding.keys.clone(),
            description: binding.description.clone(),
        });
    }

    let custom = [
        (AppAction::StoreView, 'v', "View parameter store"),
        (AppAction::Toggle, ' ', "Toggle checkbox"),
        (AppAction::ResetColor, 'r', "Reset color to default"),
        (AppAction::ColorDialog, 'o', "Open color presets"),
        (AppAction::Copy, 'y', "Copy color text"),
        (AppAction::Paste, 'p', "Paste color text"),
        (AppAction::ValueDecrementSmall, '[', "Decrease value"),
        (AppAction::ValueIncrementSmall, ']', "Increase value"),
        (AppAction::ValueDecrementLarge, '{', "Decrease value (page)"),
        (AppAction::ValueIncrementLarge, '}', "Increase value (page)"),
    ];
    for (act, key, description) in custom {
        config.bind(
            ActionBinding::builder()
                .action(act)
                .key(keys::char(key))
                .description(description)
                .build(),
        );
    }

    config.compile();
    TuiRealmDispatcher::new(config)
});

/// Convenience function for components to access the dispatcher.
pub fn dispatcher() -> &'static TuiRealmDispatcher<AppAction> {
    &DISPATCHER
}

/// Handle global application events that are common across all components.
/// Returns Some(Msg) if the action was handled, None otherwise.
pub fn handle_global_app_events(action: &AppAction) -> Option<Msg> {
    match action {
        AppAction::Tui(TuiEvent::App(AppEvent::Quit)) => Some(Msg::Quit),
        AppAction::Tui(TuiEvent::App(AppEvent::Help)) => Some(Msg::ShowHelp),
        AppAction::Tui(TuiEvent::App(AppEvent::Refresh)) => Some(Msg::Redraw),
        AppAction::StoreView => Some(Msg::SwitchToStoreView),
        _ => None,
    }
}

// ============================================================================
// TUI entry point
// ============================================================================

/// Run the settings panel over `store` until the user quits.
pub fn run(store: ParameterStore) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let context = Context {
        model: Model::new(store),
    };
    let mut manager = ActivityManager::new(context);

    let result = manager.run(&mut terminal);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}
