use serde_json::Value;
use thiserror::Error;

use super::literal::{parse_literal, LiteralError};

// ---------------------------------------------------------------------------
// Extraction result
// ---------------------------------------------------------------------------

/// Why a nested field fell back to an empty label string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("field is empty")]
    Empty,
    #[error("malformed literal: {0}")]
    Malformed(#[from] LiteralError),
    #[error("expected a list of records, found {0}")]
    NotAList(&'static str),
    #[error("element {0} is not a record")]
    NotARecord(usize),
    #[error("record {0} has no `name`")]
    MissingName(usize),
    #[error("record {0} has a `name` that is not text")]
    NameNotText(usize),
}

/// Outcome of extracting the `name` values of a tagged-record list.
///
/// Both variants carry a usable display value, so callers can keep the
/// fail-soft behaviour and still count how often the default was used.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Extracted(String),
    Defaulted(ExtractError),
}

impl Extraction {
    /// The display string; empty when extraction failed.
    pub fn value(&self) -> &str {
        match self {
            Extraction::Extracted(s) => s,
            Extraction::Defaulted(_) => "",
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Join the `name` attributes of a list of records with `", "`.
///
/// `"[{'id': 1, 'name': 'Action'}]"` gives `"Action"`; anything that is
/// not a list of records with text names gives an empty string.
pub fn extract_names(text: &str) -> Extraction {
    match try_extract(text) {
        Ok(names) => Extraction::Extracted(names.join(", ")),
        Err(e) => Extraction::Defaulted(e),
    }
}

fn try_extract(text: &str) -> Result<Vec<String>, ExtractError> {
    if text.trim().is_empty() {
        return Err(ExtractError::Empty);
    }
    let root = parse_literal(text)?;
    let Value::Array(records) = root else {
        return Err(ExtractError::NotAList(kind(&root)));
    };

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let Value::Object(mut fields) = record else {
                return Err(ExtractError::NotARecord(i));
            };
            match fields.remove("name") {
                Some(Value::String(name)) => Ok(name),
                Some(_) => Err(ExtractError::NameNotText(i)),
                None => Err(ExtractError::MissingName(i)),
            }
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "None",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "a list",
        Value::Object(_) => "a record",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_record() {
        let out = extract_names("[{'id': 1, 'name': 'Action'}]");
        assert_eq!(out, Extraction::Extracted("Action".to_string()));
    }

    #[test]
    fn test_keeps_source_order() {
        let out = extract_names(
            "[{'id': 18, 'name': 'Drama'}, {'id': 28, 'name': 'Action'}, {'id': 80, 'name': 'Crime'}]",
        );
        assert_eq!(out.value(), "Drama, Action, Crime");
    }

    #[test]
    fn test_empty_list_is_a_successful_empty_value() {
        let out = extract_names("[]");
        assert_eq!(out, Extraction::Extracted(String::new()));
    }

    #[test]
    fn test_garbage_defaults_to_empty() {
        let out = extract_names("not valid data");
        assert_eq!(out.value(), "");
        assert!(matches!(out, Extraction::Defaulted(ExtractError::Malformed(_))));
    }

    #[test]
    fn test_deeply_nested_input_defaults() {
        let out = extract_names(&"[".repeat(200_000));
        assert_eq!(out.value(), "");
        assert_eq!(
            out,
            Extraction::Defaulted(ExtractError::Malformed(LiteralError::TooDeep(
                crate::data::literal::MAX_DEPTH
            )))
        );
    }

    #[test]
    fn test_blank_field() {
        assert_eq!(extract_names("  "), Extraction::Defaulted(ExtractError::Empty));
    }

    #[test]
    fn test_wrong_shapes_default() {
        assert_eq!(
            extract_names("{'name': 'Action'}"),
            Extraction::Defaulted(ExtractError::NotAList("a record"))
        );
        assert_eq!(
            extract_names("['Action']"),
            Extraction::Defaulted(ExtractError::NotARecord(0))
        );
        assert_eq!(
            extract_names("[{'name': 'Action'}, {'id': 2}]"),
            Extraction::Defaulted(ExtractError::MissingName(1))
        );
        assert_eq!(
            extract_names("[{'name': 12}]"),
            Extraction::Defaulted(ExtractError::NameNotText(0))
        );
    }
}
