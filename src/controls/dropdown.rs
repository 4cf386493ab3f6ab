//! Dropdown over parallel label/value lists.

use crate::params::{FieldState, ParamPath, ParamUpdate, ParameterStore, Value};

use super::{BindingError, Control, require};

/// A selector whose `labels[i]` is shown for `values[i]`.
#[derive(Debug, Clone)]
pub struct Dropdown {
    label: String,
    labels: Vec<String>,
    values: Vec<Value>,
    path: ParamPath,
    selected: usize,
    enabled: bool,
    origin: FieldState,
}

impl Dropdown {
    pub fn new(
        label: impl Into<String>,
        labels: Vec<String>,
        values: Vec<Value>,
        path: ParamPath,
        store: &ParameterStore,
    ) -> Result<Self, BindingError> {
        if labels.len() != values.len() {
            return Err(BindingError::LengthMismatch {
                path,
                labels: labels.len(),
                values: values.len(),
            });
        }
        if values.is_empty() {
            return Err(BindingError::NoChoices(path));
        }

        let stored = require(store, &path)?;
        let (selected, enabled, origin) = match stored.state() {
            linked @ FieldState::Linked(_) => (0, false, linked),
            _ => match values.iter().position(|v| v == stored) {
                Some(index) => (index, true, FieldState::Literal),
                None => {
                    return Err(BindingError::ValueNotListed {
                        path,
                        value: stored.clone(),
                    });
                }
            },
        };

        Ok(Self {
            label: label.into(),
            labels,
            values,
            path,
            selected,
            enabled,
            origin,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn path(&self) -> &ParamPath {
        &self.path
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_label(&self) -> &str {
        self.labels.get(self.selected).map_or("", String::as_str)
    }

    pub fn origin(&self) -> &FieldState {
        &self.origin
    }

    /// Select `index` and write `values[index]`.
    pub fn select(&mut self, index: usize) -> Option<ParamUpdate> {
        if !self.enabled || index >= self.values.len() || index == self.selected {
            return None;
        }
        self.selected = index;
        self.origin = FieldState::Literal;
        Some(ParamUpdate::single(&self.path, self.values[index].clone()))
    }

    pub fn select_next(&mut self) -> Option<ParamUpdate> {
        let len = self.values.len();
        self.select((self.selected + 1) % len)
    }

    pub fn select_prev(&mut self) -> Option<ParamUpdate> {
        let len = self.values.len();
        self.select((self.selected + len - 1) % len)
    }
}

impl Control for Dropdown {
    fn value(&self) -> Value {
        self.values[self.selected].clone()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
