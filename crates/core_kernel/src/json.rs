//! JSON field coercion
//!
//! Borrower and funding payloads come from web forms, so numbers arrive both as
//! JSON numbers and as numeric strings (`"2.5"`, `" 1000.00 "`). These helpers
//! accept either form and reject everything else; booleans are never treated as
//! numbers.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when a JSON value cannot be read as a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumberError {
    #[error("value is not a number")]
    NotANumber,

    #[error("value is not a whole number")]
    NotWholeNumber,

    #[error("value is out of range")]
    OutOfRange,
}

/// Returns true when a field is absent or carries no meaningful value
///
/// Absent, `null`, blank strings, `false`, zero, and empty arrays/objects all
/// count as blank.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(fields)) => fields.is_empty(),
    }
}

/// Reads a decimal from a JSON number or numeric string
pub fn decimal_from(value: &Value) -> Result<Decimal, NumberError> {
    match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => Err(NumberError::NotANumber),
    }
}

/// Reads a non-fractional number from a JSON number or numeric string
pub fn whole_number_from(value: &Value) -> Result<i64, NumberError> {
    let decimal = decimal_from(value)?;
    if !decimal.fract().is_zero() {
        return Err(NumberError::NotWholeNumber);
    }
    i64::try_from(decimal.trunc()).map_err(|_| NumberError::OutOfRange)
}

/// Reads a JSON scalar as text
///
/// Numbers are rendered with their JSON representation so that a postal code
/// sent as `2000` reads the same as `"2000"`.
pub fn text_from(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Returns the object stored under `key`, if the value is an object
pub fn object_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    object.get(key).and_then(Value::as_object)
}

fn parse_decimal(raw: &str) -> Result<Decimal, NumberError> {
    if raw.is_empty() {
        return Err(NumberError::NotANumber);
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| NumberError::NotANumber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_decimal_from_number_and_string() {
        assert_eq!(decimal_from(&json!(2.5)), Ok(dec!(2.5)));
        assert_eq!(decimal_from(&json!("1000.00")), Ok(dec!(1000.00)));
        assert_eq!(decimal_from(&json!(" 42 ")), Ok(dec!(42)));
        assert_eq!(decimal_from(&json!("-5")), Ok(dec!(-5)));
    }

    #[test]
    fn test_decimal_rejects_non_numbers() {
        assert_eq!(decimal_from(&json!("not_a_number")), Err(NumberError::NotANumber));
        assert_eq!(decimal_from(&json!(true)), Err(NumberError::NotANumber));
        assert_eq!(decimal_from(&json!("")), Err(NumberError::NotANumber));
        assert_eq!(decimal_from(&json!([1])), Err(NumberError::NotANumber));
    }

    #[test]
    fn test_whole_number() {
        assert_eq!(whole_number_from(&json!(9)), Ok(9));
        assert_eq!(whole_number_from(&json!("12")), Ok(12));
        assert_eq!(whole_number_from(&json!(9.5)), Err(NumberError::NotWholeNumber));
    }

    #[test]
    fn test_blank_values() {
        assert!(is_blank(None));
        assert!(is_blank(Some(&json!(null))));
        assert!(is_blank(Some(&json!(""))));
        assert!(is_blank(Some(&json!("   "))));
        assert!(is_blank(Some(&json!([]))));
        assert!(!is_blank(Some(&json!("Acme"))));
        assert!(!is_blank(Some(&json!(5))));
    }

    #[test]
    fn test_text_from_number() {
        assert_eq!(text_from(&json!(2000)), Some("2000".to_string()));
        assert_eq!(text_from(&json!(null)), None);
    }
}
