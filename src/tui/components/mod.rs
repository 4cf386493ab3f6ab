//! TUI components using tui-realm.

pub mod figure;
pub mod help;
pub mod panel_view;

pub use figure::Figure;
pub use help::{MAIN_FOOTER_ACTIONS, STORE_VIEW_FOOTER_ACTIONS, format_footer, render_help};
pub use panel_view::PanelView;
