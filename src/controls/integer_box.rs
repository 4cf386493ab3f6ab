//! Integer spin box.

use crate::params::{FieldState, ParamPath, ParamUpdate, ParameterStore, Value};

use super::{BindingError, Control, require};

#[derive(Debug, Clone)]
pub struct IntegerBoxConfig {
    pub label: String,
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

impl Default for IntegerBoxConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            min: 0,
            max: 99,
            step: 1,
        }
    }
}

/// Spin box that always writes integers.
#[derive(Debug, Clone)]
pub struct IntegerBox {
    config: IntegerBoxConfig,
    path: ParamPath,
    current: i64,
    enabled: bool,
    origin: FieldState,
}

impl IntegerBox {
    pub fn new(
        config: IntegerBoxConfig,
        path: ParamPath,
        store: &ParameterStore,
    ) -> Result<Self, BindingError> {
        if config.min > config.max {
            return Err(BindingError::InvalidRange {
                path,
                reason: format!("min {} exceeds max {}", config.min, config.max),
            });
        }

        let stored = require(store, &path)?;
        let (current, enabled, origin) = match stored {
            Value::Int(_) | Value::Float(_) => {
                let v = stored.as_f64().unwrap_or_default().round() as i64;
                (v.clamp(config.min, config.max), true, FieldState::Literal)
            }
            Value::Text(_) => {
                let origin = match stored.state() {
                    FieldState::Literal => FieldState::Automatic,
                    other => other,
                };
                (0.clamp(config.min, config.max), false, origin)
            }
            Value::Bool(_) => {
                return Err(BindingError::TypeMismatch {
                    path,
                    expected: "integer",
                    found: stored.kind(),
                });
            }
        };

        Ok(Self {
            config,
            path,
            current,
            enabled,
            origin,
        })
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    pub fn path(&self) -> &ParamPath {
        &self.path
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    pub fn origin(&self) -> &FieldState {
        &self.origin
    }

    pub fn set_value(&mut self, value: i64) -> Option<ParamUpdate> {
        if !self.enabled {
            return None;
        }
        let value = value.clamp(self.config.min, self.config.max);
        if value == self.current {
            return None;
        }
        self.current = value;
        self.origin = FieldState::Literal;
        Some(ParamUpdate::single(&self.path, Value::Int(value)))
    }

    /// Step up or down by `count` configured steps.
    pub fn step(&mut self, count: i64) -> Option<ParamUpdate> {
        let delta = count.saturating_mul(self.config.step.max(1));
        self.set_value(self.current.saturating_add(delta))
    }
}

impl Control for IntegerBox {
    fn value(&self) -> Value {
        Value::Int(self.current)
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font_size(store: &ParameterStore) -> IntegerBox {
        IntegerBox::new(
            IntegerBoxConfig {
                label: "Font Size".into(),
                min: 4,
                max: 72,
                step: 1,
            },
            ParamPath::new("Labels", "font_size"),
            store,
        )
        .unwrap()
    }

    #[test]
    fn float_values_round_to_integers() {
        let store = ParameterStore::new().with("Labels", "font_size", 10.6);
        let mut spin = font_size(&store);
        assert_eq!(spin.current(), 11);
        let update = spin.step(2).unwrap();
        assert!(matches!(update.value, Value::Int(13)));
    }

    #[test]
    fn text_value_disables_at_clamped_zero() {
        let store = ParameterStore::new().with("Labels", "font_size", "");
        let mut spin = font_size(&store);
        assert_eq!(spin.current(), 4);
        assert!(!spin.is_enabled());
        assert_eq!(spin.origin(), &FieldState::Automatic);
        assert!(spin.set_value(12).is_none());

        spin.set_enabled(true);
        assert_eq!(
            spin.set_value(12),
            Some(ParamUpdate::single(
                &ParamPath::new("Labels", "font_size"),
                Value::Int(12)
            ))
        );
    }

    #[test]
    fn boolean_value_is_a_type_mismatch() {
        let store = ParameterStore::new().with("Labels", "font_size", true);
        let err = IntegerBox::new(
            IntegerBoxConfig::default(),
            ParamPath::new("Labels", "font_size"),
            &store,
        )
        .unwrap_err();
        assert!(matches!(err, BindingError::TypeMismatch { .. }));
    }
}
