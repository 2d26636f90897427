use std::io::{self, BufRead, Write};

use anyhow::Result;
use serde_json::{Map, Value};

use crate::output::{print_success, print_warning};
use nursecall_client::ApiClient;
use nursecall_core::ResourceKind;

/// Ask for confirmation on stdin. Defaults to "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let answer = line.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Shared delete flow: optional warning, confirmation prompt, request.
pub async fn delete_record(
    client: &ApiClient,
    kind: ResourceKind,
    id: &str,
    warning: Option<&str>,
    yes: bool,
) -> Result<()> {
    if let Some(warning) = warning {
        print_warning(warning);
    }
    if !yes {
        let proceed = confirm(&format!(
            "Delete {} {id}? This action cannot be undone.",
            kind.collection()
        ))?;
        if !proceed {
            println!("Cancelled.");
            return Ok(());
        }
    }
    client.delete(kind, id).await?;
    print_success(&format!("Deleted {} {id}", kind.collection()));
    Ok(())
}

/// Case-insensitive substring match over a row's searchable cells.
pub fn matches_search(term: &str, cells: &[String]) -> bool {
    let term = term.to_lowercase();
    cells.iter().any(|cell| cell.to_lowercase().contains(&term))
}

// --- edit-merge setters -----------------------------------------------------
//
// Edits fetch the record, overwrite just the provided fields with the same
// coercions the add forms use, and PUT the whole object back.

/// Required text: trimmed.
pub fn set_text(map: &mut Map<String, Value>, key: &str, value: &str) {
    map.insert(key.to_string(), Value::String(value.trim().to_string()));
}

/// Optional text stored as null when blank.
pub fn set_optional_text(map: &mut Map<String, Value>, key: &str, value: &str) {
    let trimmed = value.trim();
    let value = if trimmed.is_empty() {
        Value::Null
    } else {
        Value::String(trimmed.to_string())
    };
    map.insert(key.to_string(), value);
}

/// Optional foreign key: blank unassigns (null on the wire, never "").
pub fn set_optional_ref(map: &mut Map<String, Value>, key: &str, value: &str) {
    set_optional_text(map, key, value);
}

pub fn set_u32(map: &mut Map<String, Value>, key: &str, value: u32) {
    map.insert(key.to_string(), Value::Number(value.into()));
}

pub fn set_i32(map: &mut Map<String, Value>, key: &str, value: i32) {
    map.insert(key.to_string(), Value::Number(value.into()));
}

pub fn set_value(map: &mut Map<String, Value>, key: &str, value: Value) {
    map.insert(key.to_string(), value);
}

/// Parse an RFC 3339 flag value, with the flag name in the error.
pub fn parse_time_flag(flag: &str, value: &str) -> Result<nursecall_core::Timestamp> {
    value
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid --{flag}: {e}"))
}

/// Unwrap a fetched record into its field map for edit-merging.
pub fn record_object(record: Value) -> Result<Map<String, Value>> {
    match record {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("expected a record object, got {other}"),
    }
}

/// The id of a freshly created record, for the success message.
pub fn created_id(record: &Value) -> &str {
    record.get("id").and_then(|v| v.as_str()).unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_matches_search_is_case_insensitive() {
        let cells = vec!["SN-100".to_string(), "B-1".to_string()];
        assert!(matches_search("sn-1", &cells));
        assert!(matches_search("B-1", &cells));
        assert!(!matches_search("west", &cells));
    }

    #[test]
    fn test_set_optional_ref_blank_unassigns() {
        let mut map = Map::new();
        set_optional_ref(&mut map, "nurse", "");
        assert_eq!(map["nurse"], json!(null));

        set_optional_ref(&mut map, "nurse", " n1 ");
        assert_eq!(map["nurse"], json!("n1"));
    }

    #[test]
    fn test_set_text_keeps_empty_string_for_blankable_fields() {
        let mut map = Map::new();
        set_text(&mut map, "address", "");
        assert_eq!(map["address"], json!(""));
    }

    #[test]
    fn test_numeric_setters() {
        let mut map = Map::new();
        set_u32(&mut map, "age", 54);
        set_i32(&mut map, "number", -1);
        assert_eq!(map["age"], json!(54));
        assert_eq!(map["number"], json!(-1));
    }

    #[test]
    fn test_parse_time_flag_names_the_flag() {
        let err = parse_time_flag("time", "yesterday").unwrap_err();
        assert!(err.to_string().contains("--time"));
        assert!(parse_time_flag("time", "2025-03-10T08:15:00Z").is_ok());
    }
}
