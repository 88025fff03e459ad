//! Field-keyed validation errors
//!
//! Validators in this workspace never fail fast. They walk the whole payload
//! and record one message per offending field, keyed by a dotted/indexed path
//! such as `registered_address.postal_code` or `directors[0].email`. An empty
//! mapping means the payload is valid.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Flat mapping of field path to error message
///
/// Serializes as a plain JSON object, which is the wire shape clients receive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Creates an empty error mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for a field, replacing any earlier message for it
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    /// Builder-style variant of [`FieldErrors::add`]
    pub fn with(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.add(field, message);
        self
    }

    /// Merges another mapping into this one
    pub fn merge(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    /// Merges another mapping, prefixing each of its keys with `prefix.`
    pub fn merge_nested(&mut self, prefix: &str, other: FieldErrors) {
        for (field, message) in other.0 {
            self.0.insert(format!("{}.{}", prefix, field), message);
        }
    }

    /// Returns true when no errors were recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the given field has an error
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Returns the message recorded for a field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Iterates over the field paths in sorted order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over `(field, message)` pairs in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Converts the mapping into a `Result`, yielding `value` when empty
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Consumes the mapping, returning the underlying map
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

impl FromIterator<(String, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Formats an indexed path segment, e.g. `directors[0]`
pub fn indexed(collection: &str, index: usize) -> String {
    format!("{}[{}]", collection, index)
}

/// Turns a snake_case field name into a human label, e.g. `company_name` -> `Company Name`
pub fn field_label(field: &str) -> String {
    field
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_valid() {
        let errors = FieldErrors::new();
        assert!(errors.is_empty());
        assert_eq!(errors.into_result(42), Ok(42));
    }

    #[test]
    fn test_merge_nested_prefixes_keys() {
        let mut errors = FieldErrors::new();
        let nested = FieldErrors::new().with("postal_code", "bad");
        errors.merge_nested("registered_address", nested);
        assert!(errors.contains("registered_address.postal_code"));
    }

    #[test]
    fn test_field_label() {
        assert_eq!(field_label("company_name"), "Company Name");
        assert_eq!(field_label("years_in_business"), "Years In Business");
        assert_eq!(field_label("abn"), "Abn");
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let errors = FieldErrors::new().with("abn", "Invalid ABN checksum");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"abn": "Invalid ABN checksum"}));
    }

    #[test]
    fn test_indexed_path() {
        assert_eq!(format!("{}.email", indexed("directors", 0)), "directors[0].email");
    }
}
