//! Helper functions for permissive JSON access
//!
//! Rows come from an external editor and may carry nulls, numbers or
//! missing keys. These helpers never panic and never reject a row.

use crate::error::{RendererError, RendererResult};
use crate::types::RundownItem;
use serde_json::Value;

/// Get a string value from a JSON object, treating anything else as empty text
pub fn get_text_or_empty<'a>(obj: &'a Value, key: &str) -> &'a str {
    obj.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

/// Safely get a string value from JSON object
pub fn get_str<'a>(obj: &'a Value, key: &str) -> RendererResult<&'a str> {
    obj.get(key).and_then(|v| v.as_str()).ok_or_else(|| {
        RendererError::JsonError(format!("Expected string field '{}', got: {:?}", key, obj.get(key)))
    })
}

/// Parse an editor snapshot into rows.
///
/// Accepts either a bare array of rows or an object with an `items` array.
/// Non-object entries still produce an (empty) row so the table keeps one
/// line per entry.
pub fn parse_rows(value: &Value) -> RendererResult<Vec<RundownItem>> {
    let entries = match value {
        Value::Array(arr) => arr,
        Value::Object(_) => value.get("items").and_then(|v| v.as_array()).ok_or_else(|| {
            RendererError::JsonError("Expected array field 'items'".to_string())
        })?,
        other => {
            return Err(RendererError::JsonError(format!(
                "Expected array of rows, got: {}",
                other
            )))
        }
    };
    Ok(entries.iter().map(RundownItem::from_json).collect())
}

/// Parse rows from a JSON string
pub fn parse_rows_str(json: &str) -> RendererResult<Vec<RundownItem>> {
    let value: Value = serde_json::from_str(json)?;
    parse_rows(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_rows_keeps_order_and_degrades() {
        let rows = parse_rows(&json!([
            {"start": "10:00", "end": "11:00", "activity": "Akad"},
            {"start": "08:00", "end": null},
            42
        ]))
        .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].activity, "Akad");
        assert_eq!(rows[1].start, "08:00");
        assert_eq!(rows[1].end, "");
        assert!(rows[2].is_blank());
    }

    #[test]
    fn test_parse_rows_from_items_object() {
        let rows = parse_rows_str(r#"{"items": [{"start": "09:00", "end": "10:00", "activity": "Registrasi"}]}"#)
            .unwrap();
        assert_eq!(rows, vec![RundownItem::new("09:00", "10:00", "Registrasi")]);
    }

    #[test]
    fn test_parse_rows_rejects_non_list_snapshot() {
        assert!(parse_rows(&json!("rows")).is_err());
        assert!(parse_rows(&json!({"rows": []})).is_err());
        assert!(parse_rows_str("[").is_err());
    }

    #[test]
    fn test_get_str() {
        let v = json!({"image": "abc", "n": 1});
        assert_eq!(get_str(&v, "image").unwrap(), "abc");
        assert!(get_str(&v, "n").is_err());
        assert!(get_str(&v, "missing").is_err());
    }
}
