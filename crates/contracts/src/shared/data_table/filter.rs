use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOption {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub is_disabled: bool,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            is_disabled: false,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.is_disabled = true;
        self
    }
}

/// A named dropdown filter shown above the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDeclaration {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub options: Vec<FilterOption>,
}

impl FilterDeclaration {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            placeholder: None,
            options: Vec::new(),
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn option(mut self, option: FilterOption) -> Self {
        self.options.push(option);
        self
    }

    /// Whether `value` may be selected in this filter.
    ///
    /// The empty string clears the filter and is always accepted.
    pub fn accepts(&self, value: &str) -> bool {
        value.is_empty()
            || self
                .options
                .iter()
                .any(|opt| opt.value == value && !opt.is_disabled)
    }

    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|opt| opt.value == value)
            .map(|opt| opt.label.as_str())
    }
}

/// Current filter selection, keyed by filter id
///
/// An absent key means "no filter". Empty strings are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterValues(BTreeMap<String, String>);

impl FilterValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    /// Sets a filter value; the empty string removes the filter.
    pub fn set(&mut self, id: impl Into<String>, value: impl Into<String>) {
        let id = id.into();
        let value = value.into();
        if value.is_empty() {
            self.0.remove(&id);
        } else {
            self.0.insert(id, value);
        }
    }

    pub fn with(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(id, value);
        self
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Active (non-empty) filters in id order
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.active()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

impl From<BTreeMap<String, String>> for FilterValues {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map.into_iter().filter(|(_, v)| !v.is_empty()).collect())
    }
}
