//! Form payload construction.
//!
//! Add/edit commands collect raw flag values and serialize them to the
//! shape the backend expects: optional foreign keys left unselected go out
//! as explicit JSON null (never an empty string), optional text is trimmed
//! and nulled when blank, and numeric fields are numbers, not strings.

use serde_json::{Map, Number, Value};

/// Builds a JSON object for POST/PUT bodies with the coercions applied.
#[derive(Debug, Default)]
pub struct PayloadBuilder {
    map: Map<String, Value>,
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Required text field, trimmed.
    pub fn text(mut self, key: &str, value: &str) -> Self {
        self.map
            .insert(key.to_string(), Value::String(value.trim().to_string()));
        self
    }

    /// Optional text: blank or missing becomes null.
    pub fn optional_text(mut self, key: &str, value: Option<&str>) -> Self {
        let value = match value.map(str::trim) {
            Some(t) if !t.is_empty() => Value::String(t.to_string()),
            _ => Value::Null,
        };
        self.map.insert(key.to_string(), value);
        self
    }

    /// Required foreign key (a bare id).
    pub fn reference(self, key: &str, id: &str) -> Self {
        self.text(key, id)
    }

    /// Optional foreign key: unselected or empty becomes null, never "".
    pub fn optional_reference(mut self, key: &str, id: Option<&str>) -> Self {
        let value = match id.map(str::trim) {
            Some(id) if !id.is_empty() => Value::String(id.to_string()),
            _ => Value::Null,
        };
        self.map.insert(key.to_string(), value);
        self
    }

    pub fn number(mut self, key: &str, value: impl Into<Number>) -> Self {
        self.map.insert(key.to_string(), Value::Number(value.into()));
        self
    }

    pub fn optional_number(mut self, key: &str, value: Option<u32>) -> Self {
        let value = match value {
            Some(n) => Value::Number(n.into()),
            None => Value::Null,
        };
        self.map.insert(key.to_string(), value);
        self
    }

    /// Any already-serialized value (statuses, timestamps).
    pub fn value(mut self, key: &str, value: Value) -> Self {
        self.map.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> Value {
        Value::Object(self.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    #[test]
    fn test_unselected_foreign_keys_serialize_as_null() {
        let payload = PayloadBuilder::new()
            .text("name", "Asha Naidoo")
            .number("age", 54u32)
            .text("gender", "female")
            .optional_reference("bed", Some("bed-3"))
            .optional_reference("nurse", None)
            .optional_reference("device", Some(""))
            .build();

        assert_json_eq!(
            payload,
            json!({
                "name": "Asha Naidoo",
                "age": 54,
                "gender": "female",
                "bed": "bed-3",
                "nurse": null,
                "device": null
            })
        );
        // Never an empty string.
        assert_ne!(payload["device"], json!(""));
    }

    #[test]
    fn test_text_is_trimmed() {
        let payload = PayloadBuilder::new().text("name", "  North Wing  ").build();
        assert_eq!(payload["name"], "North Wing");
    }

    #[test]
    fn test_optional_text_blank_becomes_null() {
        let payload = PayloadBuilder::new()
            .optional_text("description", Some("   "))
            .optional_text("notes", None)
            .optional_text("speciality", Some("Cardiology, Oncology"))
            .build();
        assert_eq!(payload["description"], json!(null));
        assert_eq!(payload["notes"], json!(null));
        assert_eq!(payload["speciality"], "Cardiology, Oncology");
    }

    #[test]
    fn test_numbers_are_numbers_not_strings() {
        let payload = PayloadBuilder::new()
            .number("number", 3u32)
            .optional_number("floors", Some(5))
            .optional_number("beds", None)
            .build();
        assert_eq!(payload["number"], json!(3));
        assert_eq!(payload["floors"], json!(5));
        assert_eq!(payload["beds"], json!(null));
    }

    #[test]
    fn test_whitespace_reference_becomes_null() {
        let payload = PayloadBuilder::new()
            .optional_reference("supervisor", Some("  "))
            .build();
        assert_eq!(payload["supervisor"], json!(null));
    }
}
