//! Widget registry: named status strings rendered in the bottom bar.
//!
//! Widgets keep the position they were first added at; updating a value
//! never reorders the bar.

use indexmap::IndexMap;

/// Separator placed between widget values in the rendered bar.
pub const WIDGET_DELIMITER: &str = " | ";

/// Insertion-ordered mapping of widget name to display value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetRegistry {
    widgets: IndexMap<String, String>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or update a widget.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.widgets.insert(name.into(), value.into());
    }

    /// Update a widget's value, adding it if absent.
    pub fn update(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.add(name, value);
    }

    /// Remove a widget by name. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.widgets.shift_remove(name).is_some()
    }

    /// Look up a widget's current value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.widgets.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Iterate `(name, value)` pairs in bar order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.widgets.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render all values as a single line in insertion order.
    pub fn render(&self) -> String {
        self.widgets
            .values()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(WIDGET_DELIMITER)
    }
}
