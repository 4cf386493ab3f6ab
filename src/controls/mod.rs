//! Input controls bound to parameter store fields.
//!
//! Controls never touch the store directly: every interaction returns an
//! optional [`ParamUpdate`](crate::params::ParamUpdate) that the host applies
//! with `update_params` and follows with a redraw.

mod activator;
mod checkbox;
mod color_picker;
mod dropdown;
mod integer_box;
mod list_options;
mod slider;

pub use activator::{Activator, ActivatorState};
pub use checkbox::CheckBox;
pub use color_picker::{ColorPicker, ColorPickerConfig};
pub use dropdown::Dropdown;
pub use integer_box::{IntegerBox, IntegerBoxConfig};
pub use list_options::ListOptions;
pub use slider::{Slider, SliderConfig};

use crate::params::{ParamPath, ParameterStore, Value};

/// Capabilities a control must expose to be governed by an [`Activator`].
pub trait Control {
    /// The control's current display value, in stored units.
    fn value(&self) -> Value;

    fn set_enabled(&mut self, enabled: bool);

    fn is_enabled(&self) -> bool;
}

/// Configuration faults detected while binding a control to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingError {
    /// The referenced field does not exist in the store
    MissingField(ParamPath),
    /// The stored value has the wrong type for the control
    TypeMismatch {
        path: ParamPath,
        expected: &'static str,
        found: &'static str,
    },
    /// Label and value lists have different lengths
    LengthMismatch {
        path: ParamPath,
        labels: usize,
        values: usize,
    },
    /// A choice control was given no choices
    NoChoices(ParamPath),
    /// The stored value is not one of the control's choices
    ValueNotListed { path: ParamPath, value: Value },
    /// Range or conversion settings cannot work
    InvalidRange { path: ParamPath, reason: String },
    /// A color control was bound to no fields
    NoFields(String),
}

impl std::fmt::Display for BindingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(path) => write!(f, "parameter {} does not exist", path),
            Self::TypeMismatch {
                path,
                expected,
                found,
            } => write!(f, "parameter {} holds a {}, expected a {}", path, found, expected),
            Self::LengthMismatch {
                path,
                labels,
                values,
            } => write!(
                f,
                "parameter {} has {} labels but {} values",
                path, labels, values
            ),
            Self::NoChoices(path) => write!(f, "parameter {} has no choices", path),
            Self::ValueNotListed { path, value } => {
                write!(f, "parameter {} holds {}, which is not a choice", path, value)
            }
            Self::InvalidRange { path, reason } => {
                write!(f, "parameter {} has an invalid range: {}", path, reason)
            }
            Self::NoFields(section) => {
                write!(f, "color control in section {} targets no fields", section)
            }
        }
    }
}

impl std::error::Error for BindingError {}

/// Look up a field that must already exist.
pub(crate) fn require<'a>(
    store: &'a ParameterStore,
    path: &ParamPath,
) -> Result<&'a Value, BindingError> {
    store
        .get_path(path)
        .ok_or_else(|| BindingError::MissingField(path.clone()))
}
