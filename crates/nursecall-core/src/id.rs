use thiserror::Error;

/// Server ids are opaque strings; the backend stores them in columns capped
/// at 100 characters.
const MAX_ID_LEN: usize = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("id cannot be empty")]
    Empty,
    #[error("id exceeds {MAX_ID_LEN} characters")]
    TooLong,
    #[error("id contains invalid character: {0:?}")]
    InvalidChar(char),
}

/// Generate a new entity id (used only for test fixtures; real ids are
/// assigned by the backend).
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Validate an id before interpolating it into a request path.
pub fn validate_id(id: &str) -> Result<(), IdError> {
    if id.is_empty() {
        return Err(IdError::Empty);
    }
    if id.len() > MAX_ID_LEN {
        return Err(IdError::TooLong);
    }
    if let Some(c) = id
        .chars()
        .find(|&c| matches!(c, '/' | '?' | '#') || c.is_whitespace())
    {
        return Err(IdError::InvalidChar(c));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_valid() {
        let id = generate_id();
        assert!(validate_id(&id).is_ok());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn test_empty_id_rejected() {
        assert_eq!(validate_id(""), Err(IdError::Empty));
    }

    #[test]
    fn test_overlong_id_rejected() {
        let id = "a".repeat(101);
        assert_eq!(validate_id(&id), Err(IdError::TooLong));
    }

    #[test]
    fn test_path_characters_rejected() {
        assert_eq!(validate_id("a/b"), Err(IdError::InvalidChar('/')));
        assert_eq!(validate_id("a?b"), Err(IdError::InvalidChar('?')));
        assert_eq!(validate_id("a b"), Err(IdError::InvalidChar(' ')));
    }

    #[test]
    fn test_plain_ids_accepted() {
        assert!(validate_id("b1").is_ok());
        assert!(validate_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
    }
}
