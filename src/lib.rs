//! Settings panel for editing circle, rectangle and label styles.
//!
//! Controls bind to fields of a host-owned [`ParameterStore`] and describe
//! every edit as a [`ParamUpdate`]; the host applies it and redraws.

pub mod cli;
pub mod color;
pub mod config;
pub mod controls;
pub mod logging;
pub mod panel;
pub mod params;
pub mod tui;

pub use params::{ParamUpdate, ParameterStore};
