//! Activity modules for the TUI.

pub mod main;
pub mod store_view;

pub use main::MainActivity;
pub use main::Msg;
pub use store_view::StoreViewActivity;
