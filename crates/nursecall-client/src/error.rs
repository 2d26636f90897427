//! Client-side error taxonomy.
//!
//! The backend's error bodies were never formally specified; observed shapes
//! are `{detail}`, `{message}`, `{non_field_errors: [...]}`, and
//! `{<field>: [messages]}`, sometimes combined. [`ErrorBody`] models that as
//! one closed type with a deterministic display precedence instead of ad-hoc
//! property probing at every call site.

use indexmap::IndexMap;
use nursecall_core::ResourceKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Messages attached to a single field in a validation response.
///
/// Lenient on input: accepts a bare string, an array of strings, or anything
/// else (ignored), so an unexpected body shape degrades instead of failing
/// the whole error parse.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FieldMessages(pub Vec<String>);

impl<'de> Deserialize<'de> for FieldMessages {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let messages = match value {
            Value::String(s) => vec![s],
            Value::Array(items) => items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    other => Some(other.to_string()),
                })
                .collect(),
            _ => Vec::new(),
        };
        Ok(FieldMessages(messages))
    }
}

/// Closed error-response contract with display precedence:
/// `detail` → `message` → `non_field_errors` → first field error → generic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub non_field_errors: Vec<String>,
    #[serde(flatten)]
    pub field_errors: IndexMap<String, FieldMessages>,
}

impl ErrorBody {
    /// Best-effort parse of a response body. Anything that is not a JSON
    /// object becomes an empty body (display falls through to the generic
    /// message).
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.detail.is_none()
            && self.message.is_none()
            && self.non_field_errors.is_empty()
            && self.field_errors.values().all(|m| m.0.is_empty())
    }

    /// The one-line message to show the user.
    pub fn display_message(&self) -> String {
        if let Some(detail) = &self.detail {
            return detail.clone();
        }
        if let Some(message) = &self.message {
            return message.clone();
        }
        if !self.non_field_errors.is_empty() {
            return self.non_field_errors.join("; ");
        }
        for (field, messages) in &self.field_errors {
            if let Some(first) = messages.0.first() {
                return format!("{field}: {first}");
            }
        }
        "Request failed".to_string()
    }

    /// Per-field messages, for inline rendering next to form flags.
    pub fn field_messages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.field_errors.iter().flat_map(|(field, messages)| {
            messages.0.iter().map(move |m| (field.as_str(), m.as_str()))
        })
    }
}

/// Errors from talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401 — the stored token is missing, expired, or revoked.
    #[error("Session expired or not authorized")]
    Unauthorized,

    /// 404 on a detail endpoint.
    #[error("{kind} {id} not found")]
    NotFound { kind: ResourceKind, id: String },

    /// 400 with (possibly field-keyed) validation messages.
    #[error("Validation failed: {}", .body.display_message())]
    Validation { body: ErrorBody },

    /// Any other non-success status.
    #[error("HTTP {status}: {message}")]
    Unexpected { status: u16, message: String },

    /// Response body did not have the promised shape.
    #[error("Unexpected response shape: {0}")]
    UnexpectedBody(String),

    #[error("Invalid entity id: {0}")]
    InvalidId(#[from] nursecall_core::IdError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse response JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn validation_body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Validation { body } => Some(body),
            _ => None,
        }
    }
}

/// Convenience result type for client operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_takes_precedence() {
        let body = ErrorBody::parse(r#"{"detail": "Not found.", "message": "ignored"}"#);
        assert_eq!(body.display_message(), "Not found.");
    }

    #[test]
    fn test_message_when_no_detail() {
        let body = ErrorBody::parse(r#"{"message": "Failed to save building"}"#);
        assert_eq!(body.display_message(), "Failed to save building");
    }

    #[test]
    fn test_non_field_errors_joined() {
        let body =
            ErrorBody::parse(r#"{"non_field_errors": ["Ward is full", "Bed already assigned"]}"#);
        assert_eq!(body.display_message(), "Ward is full; Bed already assigned");
    }

    #[test]
    fn test_field_errors_fallback() {
        let body = ErrorBody::parse(r#"{"number": ["This field is required."]}"#);
        assert_eq!(body.display_message(), "number: This field is required.");
        let collected: Vec<_> = body.field_messages().collect();
        assert_eq!(collected, vec![("number", "This field is required.")]);
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(ErrorBody::parse("{}").display_message(), "Request failed");
        assert_eq!(
            ErrorBody::parse("<html>gateway timeout</html>").display_message(),
            "Request failed"
        );
        assert!(ErrorBody::parse("").is_empty());
    }

    #[test]
    fn test_field_messages_accept_bare_string() {
        let body = ErrorBody::parse(r#"{"ward": "invalid id"}"#);
        assert_eq!(body.display_message(), "ward: invalid id");
    }

    #[test]
    fn test_field_messages_ignore_non_string_shapes() {
        let body = ErrorBody::parse(r#"{"ward": {"nested": true}}"#);
        assert_eq!(body.display_message(), "Request failed");
    }

    #[test]
    fn test_field_error_order_is_preserved() {
        let body = ErrorBody::parse(r#"{"zeta": ["z"], "alpha": ["a"]}"#);
        let fields: Vec<_> = body.field_errors.keys().cloned().collect();
        assert_eq!(fields, vec!["zeta".to_string(), "alpha".to_string()]);
        // First field in response order wins the display slot.
        assert_eq!(body.display_message(), "zeta: z");
    }

    #[test]
    fn test_api_error_predicates() {
        assert!(ApiError::Unauthorized.is_unauthorized());
        let not_found = ApiError::NotFound {
            kind: ResourceKind::Ward,
            id: "w1".to_string(),
        };
        assert!(not_found.is_not_found());
        assert_eq!(not_found.to_string(), "wards w1 not found");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ApiError::Validation {
            body: ErrorBody::parse(r#"{"detail": "Invalid ward"}"#),
        };
        assert_eq!(err.to_string(), "Validation failed: Invalid ward");
        assert!(err.validation_body().is_some());
    }
}
