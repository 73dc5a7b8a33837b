//! Browser form submission model.

use crate::validation::contact_schema::{ContactField, FieldMap};

/// Ordered multi-map of submitted form fields.
///
/// Mirrors browser `FormData`: keys may repeat and `get` returns the first
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry, keeping earlier values for the same key.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// Builder-style variant of [`FormData::append`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(key, value);
        self
    }

    /// First value submitted under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field map for a create submission.
    ///
    /// Required fields pass through as submitted (an empty `name` is still
    /// reported as too short); blank optional fields count as absent.
    pub fn create_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        for field in [ContactField::Email, ContactField::Name] {
            if let Some(value) = self.get(field.as_str()) {
                fields.insert(field.as_str().to_string(), value.to_string());
            }
        }
        for field in [ContactField::Phone, ContactField::Company] {
            self.insert_non_blank(&mut fields, field);
        }
        fields
    }

    /// Field map for an update submission. Blank values count as absent.
    pub fn update_fields(&self) -> FieldMap {
        let mut fields = FieldMap::new();
        for field in [
            ContactField::Email,
            ContactField::Name,
            ContactField::Phone,
            ContactField::Company,
        ] {
            self.insert_non_blank(&mut fields, field);
        }
        fields
    }

    fn insert_non_blank(&self, fields: &mut FieldMap, field: ContactField) {
        if let Some(value) = self.get(field.as_str()).filter(|value| !value.is_empty()) {
            fields.insert(field.as_str().to_string(), value.to_string());
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}
