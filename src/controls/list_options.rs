//! Filterable single-selection list.

use crate::params::{ParamPath, ParamUpdate, ParameterStore, Value};

use super::{BindingError, Control, require};

/// A fixed option set with a live, case-insensitive substring filter.
#[derive(Debug, Clone)]
pub struct ListOptions {
    label: String,
    path: ParamPath,
    options: Vec<String>,
    selected: usize,
    filter: String,
    /// Indices into `options` that match `filter`.
    visible: Vec<usize>,
    /// Highlighted row within `visible`.
    cursor: usize,
    enabled: bool,
}

impl ListOptions {
    pub fn new(
        label: impl Into<String>,
        options: Vec<String>,
        path: ParamPath,
        store: &ParameterStore,
    ) -> Result<Self, BindingError> {
        if options.is_empty() {
            return Err(BindingError::NoChoices(path));
        }
        let stored = require(store, &path)?;
        let Some(text) = stored.as_str() else {
            return Err(BindingError::TypeMismatch {
                path,
                expected: "string",
                found: stored.kind(),
            });
        };
        let Some(selected) = options.iter().position(|o| o == text) else {
            return Err(BindingError::ValueNotListed {
                path,
                value: stored.clone(),
            });
        };

        let visible = (0..options.len()).collect();
        Ok(Self {
            label: label.into(),
            path,
            options,
            selected,
            filter: String::new(),
            visible,
            cursor: selected,
            enabled: true,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn path(&self) -> &ParamPath {
        &self.path
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selected(&self) -> &str {
        &self.options[self.selected]
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Options passing the current filter, in original order.
    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.visible.iter().map(|&i| self.options[i].as_str())
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Cursor position within the visible options.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
        let needle = filter.to_lowercase();
        self.visible = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        // Keep the cursor on the selection when it is still visible
        self.cursor = self
            .visible
            .iter()
            .position(|&i| i == self.selected)
            .unwrap_or(0);
    }

    pub fn push_filter_char(&mut self, c: char) {
        let mut filter = self.filter.clone();
        filter.push(c);
        self.set_filter(&filter);
    }

    pub fn pop_filter_char(&mut self) {
        let mut filter = self.filter.clone();
        filter.pop();
        self.set_filter(&filter);
    }

    pub fn clear_filter(&mut self) {
        self.set_filter("");
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.visible.is_empty() {
            self.cursor = 0;
            return;
        }
        let last = self.visible.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    /// Select the option under the cursor.
    pub fn confirm(&mut self) -> Option<ParamUpdate> {
        self.select_visible(self.cursor)
    }

    /// Select the `index`-th visible option and write its text.
    pub fn select_visible(&mut self, index: usize) -> Option<ParamUpdate> {
        if !self.enabled {
            return None;
        }
        let option = *self.visible.get(index)?;
        self.cursor = index;
        if option == self.selected {
            return None;
        }
        self.selected = option;
        Some(ParamUpdate::single(
            &self.path,
            Value::Text(self.options[option].clone()),
        ))
    }
}

impl Control for ListOptions {
    fn value(&self) -> Value {
        Value::Text(self.selected().to_string())
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

    fn fonts(store: &ParameterStore) -> ListOptions {
        ListOptions::new(
            "Font",
            ["DejaVu Sans", "DejaVu Serif", "Liberation Mono", "Noto Sans"]
                .map(String::from)
                .to_vec(),
            ParamPath::new("Labels", "font_family"),
            store,
        )
        .unwrap()
    }

    #[test]
    fn filter_is_case_insensitive_and_keeps_options() {
        let store = ParameterStore::new().with("Labels", "font_family", "Noto Sans");
        let mut list = fonts(&store);
        list.set_filter("dejavu");
        assert_eq!(
            list.visible().collect::<Vec<_>>(),
            vec!["DejaVu Sans", "DejaVu Serif"]
        );
        assert_eq!(list.options().len(), 4);
        assert_eq!(list.selected(), "Noto Sans");
    }

    #[test]
    fn selection_writes_option_text() {
        let store = ParameterStore::new().with("Labels", "font_family", "Noto Sans");
        let mut list = fonts(&store);
        list.set_filter("SERIF");
        let update = list.confirm().unwrap();
        assert_eq!(update.value, Value::text("DejaVu Serif"));
        assert_eq!(list.selected(), "DejaVu Serif");
    }

    #[test]
    fn empty_filter_result_selects_nothing() {
        let store = ParameterStore::new().with("Labels", "font_family", "Noto Sans");
        let mut list = fonts(&store);
        list.set_filter("comic");
        assert_eq!(list.visible_len(), 0);
        assert!(list.confirm().is_none());
        list.clear_filter();
        assert_eq!(list.visible_len(), 4);
        assert_eq!(list.cursor(), 3);
    }

    #[test]
    fn typed_filter_and_cursor_moves() {
        let store = ParameterStore::new().with("Labels", "font_family", "DejaVu Sans");
        let mut list = fonts(&store);
        for c in "sans".chars() {
            list.push_filter_char(c);
        }
        assert_eq!(list.visible().collect::<Vec<_>>(), vec!["DejaVu Sans", "Noto Sans"]);
        list.move_cursor(5);
        assert_eq!(list.cursor(), 1);
        let update = list.confirm().unwrap();
        assert_eq!(update.value, Value::text("Noto Sans"));
        list.pop_filter_char();
        assert_eq!(list.filter(), "san");
    }

    #[test]
    fn unlisted_value_fails_fast() {
        let store = ParameterStore::new().with("Labels", "font_family", "Comic Sans");
        let err = ListOptions::new(
            "Font",
            vec!["Noto Sans".into()],
            ParamPath::new("Labels", "font_family"),
            &store,
        )
        .unwrap_err();
        assert!(matches!(err, BindingError::ValueNotListed { .. }));
    }
}
