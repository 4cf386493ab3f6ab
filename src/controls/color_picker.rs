//! Color swatch with a hex text field, writing one color to several fields.

use palette::Srgb;

use crate::color::{self, ColorInput};
use crate::params::{ParamPath, ParamUpdate, ParameterStore, Value};

use super::{BindingError, Control, require};

#[derive(Debug, Clone)]
pub struct ColorPickerConfig {
    pub label: String,
    /// Color restored by a reset; independent of the stored value.
    pub default_color: String,
}

impl Default for ColorPickerConfig {
    fn default() -> Self {
        Self {
            label: "Pick a colour:".to_string(),
            default_color: "#ff0000".to_string(),
        }
    }
}

/// Swatch + text field pair. The swatch holds the last accepted color; the
/// text field holds whatever was last typed or pasted.
#[derive(Debug, Clone)]
pub struct ColorPicker {
    config: ColorPickerConfig,
    section: String,
    fields: Vec<String>,
    swatch: String,
    text: String,
    enabled: bool,
}

impl ColorPicker {
    pub fn new(
        config: ColorPickerConfig,
        section: impl Into<String>,
        fields: Vec<String>,
        store: &ParameterStore,
    ) -> Result<Self, BindingError> {
        let section = section.into();
        let Some(first) = fields.first() else {
            return Err(BindingError::NoFields(section));
        };
        for field in &fields {
            require(store, &ParamPath::new(section.clone(), field.clone()))?;
        }

        let stored = store.get(&section, first).and_then(Value::as_str);
        let swatch = stored
            .and_then(|s| color::classify(s).into_value())
            .unwrap_or_else(|| config.default_color.clone());

        Ok(Self {
            text: swatch.clone(),
            swatch,
            config,
            section,
            fields,
            enabled: true,
        })
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Currently accepted color.
    pub fn color(&self) -> &str {
        &self.swatch
    }

    /// Contents of the text field.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn default_color(&self) -> &str {
        &self.config.default_color
    }

    /// Swatch color for drawing, if it parses.
    pub fn rgb(&self) -> Option<Srgb<u8>> {
        color::parse_rgb(&self.swatch)
    }

    /// Set the swatch directly (dialog pick, reset). The text field follows.
    pub fn set_color(&mut self, color: impl Into<String>) -> Option<ParamUpdate> {
        if !self.enabled {
            return None;
        }
        let color = color.into();
        if color == self.swatch {
            self.text = color;
            return None;
        }
        self.swatch = color.clone();
        self.text = color.clone();
        Some(self.write(color))
    }

    /// Accept a color from the picker dialog.
    pub fn pick(&mut self, rgb: Srgb<u8>) -> Option<ParamUpdate> {
        self.set_color(color::to_hex(rgb))
    }

    /// Handle typed or pasted text. Strict hex is kept as typed, looser
    /// color names are normalized, anything else is dropped silently.
    pub fn edit_text(&mut self, text: &str) -> Option<ParamUpdate> {
        if !self.enabled {
            return None;
        }
        self.text = text.to_string();
        match color::classify(text) {
            ColorInput::Strict(hex) => self.accept(hex),
            ColorInput::Loose(hex) => {
                self.text = hex.clone();
                self.accept(hex)
            }
            ColorInput::Invalid => {
                tracing::debug!(text, "ignoring invalid color text");
                None
            }
        }
    }

    /// Right-click gesture: back to the configured default.
    pub fn reset(&mut self) -> Option<ParamUpdate> {
        self.set_color(self.config.default_color.clone())
    }

    /// Text to place on the clipboard.
    pub fn copy(&self) -> &str {
        &self.text
    }

    pub fn paste(&mut self, clipboard: &str) -> Option<ParamUpdate> {
        self.edit_text(clipboard)
    }

    fn accept(&mut self, color: String) -> Option<ParamUpdate> {
        if color == self.swatch {
            return None;
        }
        self.swatch = color.clone();
        Some(self.write(color))
    }

    fn write(&self, color: String) -> ParamUpdate {
        ParamUpdate::linked(&self.section, &self.fields, Value::Text(color))
    }
}

impl Control for ColorPicker {
    fn value(&self) -> Value {
        Value::Text(self.swatch.clone())
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

    fn picker(store: &ParameterStore) -> ColorPicker {
        ColorPicker::new(
            ColorPickerConfig {
                label: "Color".into(),
                default_color: "#ff0000".into(),
            },
            "Circle",
            vec!["color".into(), "edgecolor".into()],
            store,
        )
        .unwrap()
    }

    fn store() -> ParameterStore {
        ParameterStore::new()
            .with("Circle", "color", "#00ff00")
            .with("Circle", "edgecolor", "#00ff00")
    }

    #[test]
    fn swatch_then_text_round_trips() {
        let mut picker = picker(&store());
        let update = picker.set_color("#ff0000").unwrap();
        assert_eq!(picker.text(), "#ff0000");
        assert_eq!(update.fields, vec!["color".to_string(), "edgecolor".to_string()]);
        assert_eq!(update.value, Value::text("#ff0000"));
    }

    #[test]
    fn loose_name_normalizes_to_hex() {
        let mut picker = picker(&store());
        let update = picker.edit_text("red").unwrap();
        assert_eq!(picker.color(), "#ff0000");
        assert_eq!(picker.text(), "#ff0000");
        assert_eq!(update.value, Value::text("#ff0000"));
    }

    #[test]
    fn strict_hex_is_stored_as_typed() {
        let mut picker = picker(&store());
        let update = picker.edit_text("#ABCDEF").unwrap();
        assert_eq!(update.value, Value::text("#ABCDEF"));
        assert_eq!(picker.text(), "#ABCDEF");
    }

    #[test]
    fn invalid_text_keeps_last_color() {
        let mut picker = picker(&store());
        assert!(picker.edit_text("#12").is_none());
        assert_eq!(picker.text(), "#12");
        assert_eq!(picker.color(), "#00ff00");
    }

    #[test]
    fn same_color_is_not_rewritten() {
        let mut picker = picker(&store());
        assert!(picker.edit_text("#00ff00").is_none());
        assert!(picker.edit_text("lime").is_none());
        assert!(picker.set_color("#00ff00").is_none());
    }

    #[test]
    fn reset_restores_configured_default() {
        let mut picker = picker(&store());
        let update = picker.reset().unwrap();
        assert_eq!(update.value, Value::text("#ff0000"));
        assert!(picker.reset().is_none());
    }

    #[test]
    fn unset_store_value_shows_default() {
        let store = ParameterStore::new()
            .with("Circle", "color", "")
            .with("Circle", "edgecolor", "");
        let picker = picker(&store);
        assert_eq!(picker.color(), "#ff0000");
        assert_eq!(picker.value(), Value::text("#ff0000"));
    }

    #[test]
    fn dialog_pick_and_paste() {
        let mut picker = picker(&store());
        let update = picker.pick(Srgb::new(0x1f, 0x77, 0xb4)).unwrap();
        assert_eq!(update.value, Value::text("#1f77b4"));
        assert_eq!(picker.copy(), "#1f77b4");

        let update = picker.paste("  blue ").unwrap();
        assert_eq!(update.value, Value::text("#0000ff"));
    }

    #[test]
    fn disabled_picker_ignores_input() {
        let mut picker = picker(&store());
        picker.set_enabled(false);
        assert!(picker.edit_text("red").is_none());
        assert!(picker.reset().is_none());
        assert_eq!(picker.color(), "#00ff00");
    }

    #[test]
    fn missing_linked_field_fails_fast() {
        let store = ParameterStore::new().with("Circle", "color", "#00ff00");
        let err = ColorPicker::new(
            ColorPickerConfig::default(),
            "Circle",
            vec!["color".into(), "edgecolor".into()],
            &store,
        )
        .unwrap_err();
        assert_eq!(
            err,
            BindingError::MissingField(ParamPath::new("Circle", "edgecolor"))
        );
    }
}
