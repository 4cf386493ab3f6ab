//! Checkbox that hands a field over to a sentinel value.
//!
//! While checked, the governed control is disabled and the field holds the
//! sentinel. While unchecked, the governed control is enabled and the field
//! holds the control's own value. Only toggling the checkbox moves between
//! the two states.

use crate::params::{ParamPath, ParamUpdate, ParameterStore, Value};

use super::{BindingError, Control, require};

/// Which side currently owns the governed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivatorState {
    /// Unchecked: the governed control's value is authoritative.
    GovernedActive,
    /// Checked: the field holds the sentinel.
    SentinelActive,
}

#[derive(Debug, Clone)]
pub struct Activator<C> {
    label: String,
    path: ParamPath,
    sentinel: Value,
    checked: bool,
    /// The pair as a whole; a disabled pair ignores toggles.
    enabled: bool,
    governed: C,
}

impl<C: Control> Activator<C> {
    /// Bind `governed` to `path`; the box starts checked when the stored
    /// value equals `param_if_checked`.
    pub fn new(
        label: impl Into<String>,
        path: ParamPath,
        mut governed: C,
        param_if_checked: Value,
        store: &ParameterStore,
    ) -> Result<Self, BindingError> {
        let checked = *require(store, &path)? == param_if_checked;
        governed.set_enabled(!checked);

        Ok(Self {
            label: label.into(),
            path,
            sentinel: param_if_checked,
            checked,
            enabled: true,
            governed,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn path(&self) -> &ParamPath {
        &self.path
    }

    pub fn sentinel(&self) -> &Value {
        &self.sentinel
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn state(&self) -> ActivatorState {
        if self.checked {
            ActivatorState::SentinelActive
        } else {
            ActivatorState::GovernedActive
        }
    }

    pub fn governed(&self) -> &C {
        &self.governed
    }

    /// Interactions go straight to the governed control; a disabled
    /// control ignores them.
    pub fn governed_mut(&mut self) -> &mut C {
        &mut self.governed
    }

    pub fn toggle(&mut self) -> Option<ParamUpdate> {
        self.set_checked(!self.checked)
    }

    /// Returns `None` when `checked` is already the current state or the
    /// pair is disabled.
    pub fn set_checked(&mut self, checked: bool) -> Option<ParamUpdate> {
        (self.enabled && checked != self.checked).then(|| self.apply(checked))
    }

    fn apply(&mut self, checked: bool) -> ParamUpdate {
        self.checked = checked;
        self.governed.set_enabled(self.enabled && !checked);
        let value = if checked {
            self.sentinel.clone()
        } else {
            self.governed.value()
        };
        tracing::debug!(path = %self.path, checked, "activator toggled");
        ParamUpdate::single(&self.path, value)
    }
}

impl<C: Control> Control for Activator<C> {
    fn value(&self) -> Value {
        if self.checked {
            self.sentinel.clone()
        } else {
            self.governed.value()
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        // Enabling only restores the governed control when the box is unchecked
        self.enabled = enabled;
        self.governed.set_enabled(enabled && !self.checked);
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
