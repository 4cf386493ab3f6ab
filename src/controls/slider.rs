//! Integer-position slider with a display-to-stored conversion factor.

use crate::params::{FieldState, ParamPath, ParamUpdate, ParameterStore, Value};

use super::{BindingError, Control, require};

/// Configuration for a slider.
#[derive(Debug, Clone)]
pub struct SliderConfig {
    pub label: String,
    pub min: i32,
    pub max: i32,
    pub tick_interval: i32,
    /// Raw position = stored value × factor.
    pub conversion_factor: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            min: 0,
            max: 100,
            tick_interval: 1,
            conversion_factor: 1.0,
        }
    }
}

/// A horizontal slider writing `position / conversion_factor`.
#[derive(Debug, Clone)]
pub struct Slider {
    config: SliderConfig,
    path: ParamPath,
    position: i32,
    enabled: bool,
    origin: FieldState,
}

impl Slider {
    pub fn new(
        config: SliderConfig,
        path: ParamPath,
        store: &ParameterStore,
    ) -> Result<Self, BindingError> {
        if config.min > config.max {
            return Err(BindingError::InvalidRange {
                path,
                reason: format!("min {} exceeds max {}", config.min, config.max),
            });
        }
        if config.conversion_factor == 0.0 || !config.conversion_factor.is_finite() {
            return Err(BindingError::InvalidRange {
                path,
                reason: format!("conversion factor {}", config.conversion_factor),
            });
        }

        let stored = require(store, &path)?;
        let (position, enabled, origin) = match stored {
            Value::Int(_) | Value::Float(_) => {
                let v = stored.as_f64().unwrap_or_default();
                let raw = (v * config.conversion_factor).round() as i32;
                (raw.clamp(config.min, config.max), true, FieldState::Literal)
            }
            Value::Text(_) => {
                // Not a number: show 0 and leave the field alone until re-enabled
                let origin = match stored.state() {
                    FieldState::Literal => FieldState::Automatic,
                    other => other,
                };
                (0.clamp(config.min, config.max), false, origin)
            }
            Value::Bool(_) => {
                return Err(BindingError::TypeMismatch {
                    path,
                    expected: "number",
                    found: stored.kind(),
                });
            }
        };

        Ok(Self {
            config,
            path,
            position,
            enabled,
            origin,
        })
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn path(&self) -> &ParamPath {
        &self.path
    }

    pub fn position(&self) -> i32 {
        self.position
    }

    /// How the stored value looked when the slider was bound.
    pub fn origin(&self) -> &FieldState {
        &self.origin
    }

    /// Move the handle to `raw`. Returns the write for the new position.
    pub fn set_position(&mut self, raw: i32) -> Option<ParamUpdate> {
        if !self.enabled {
            return None;
        }
        let raw = raw.clamp(self.config.min, self.config.max);
        if raw == self.position {
            return None;
        }
        self.position = raw;
        self.origin = FieldState::Literal;
        Some(ParamUpdate::single(&self.path, self.value()))
    }

    /// Move by `ticks` single steps.
    pub fn step(&mut self, ticks: i32) -> Option<ParamUpdate> {
        self.set_position(self.position.saturating_add(ticks))
    }

    /// Move by `pages` tick intervals.
    pub fn page(&mut self, pages: i32) -> Option<ParamUpdate> {
        let interval = self.config.tick_interval.max(1);
        self.set_position(self.position.saturating_add(pages.saturating_mul(interval)))
    }

    /// Fraction of the range covered by the handle, for drawing.
    pub fn ratio(&self) -> f64 {
        let span = f64::from(self.config.max - self.config.min);
        if span == 0.0 {
            0.0
        } else {
            f64::from(self.position - self.config.min) / span
        }
    }
}

impl Control for Slider {
    fn value(&self) -> Value {
        Value::from_f64(f64::from(self.position) / self.config.conversion_factor)
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
