//! Boolean checkbox.

use crate::params::{ParamPath, ParamUpdate, ParameterStore, Value};

use super::{BindingError, Control, require};

#[derive(Debug, Clone)]
pub struct CheckBox {
    label: String,
    path: ParamPath,
    checked: bool,
    enabled: bool,
}

impl CheckBox {
    pub fn new(
        label: impl Into<String>,
        path: ParamPath,
        store: &ParameterStore,
    ) -> Result<Self, BindingError> {
        let stored = require(store, &path)?;
        let checked = stored.as_bool().ok_or_else(|| BindingError::TypeMismatch {
            path: path.clone(),
            expected: "boolean",
            found: stored.kind(),
        })?;

        Ok(Self {
            label: label.into(),
            path,
            checked,
            enabled: true,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn path(&self) -> &ParamPath {
        &self.path
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn toggle(&mut self) -> Option<ParamUpdate> {
        self.set_checked(!self.checked)
    }

    pub fn set_checked(&mut self, checked: bool) -> Option<ParamUpdate> {
        if !self.enabled || checked == self.checked {
            return None;
        }
        self.checked = checked;
        Some(ParamUpdate::single(&self.path, Value::Bool(checked)))
    }
}

impl Control for CheckBox {
    fn value(&self) -> Value {
        Value::Bool(self.checked)
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
