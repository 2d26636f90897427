//! Optional foreign-key handling.
//!
//! Reference fields on the wire hold either an id string or null, but the
//! backend has historically accepted (and some clients sent) empty strings
//! for "no value". This type normalizes all of those on the way in and
//! guarantees we only ever send an id or an explicit null on the way out —
//! never an empty string.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// An optional reference to another entity, by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Reference {
    /// No referenced entity ("Unassigned" in the UI).
    #[default]
    Unset,
    /// References the entity with this id.
    Set(String),
}

impl Reference {
    /// Build from already-validated data.
    pub fn new(id: impl Into<String>) -> Self {
        Self::Set(id.into())
    }

    /// Build from raw user/form input: trims, and treats empty as unset.
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            Self::Unset
        } else {
            Self::Set(trimmed.to_string())
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    pub fn as_id(&self) -> Option<&str> {
        match self {
            Self::Set(id) => Some(id),
            Self::Unset => None,
        }
    }

    pub fn into_id(self) -> Option<String> {
        match self {
            Self::Set(id) => Some(id),
            Self::Unset => None,
        }
    }
}

impl From<Option<String>> for Reference {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(id) => Self::from_input(&id),
            None => Self::Unset,
        }
    }
}

impl From<&str> for Reference {
    fn from(value: &str) -> Self {
        Self::from_input(value)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Set(id) => write!(f, "{id}"),
            Self::Unset => write!(f, "Unassigned"),
        }
    }
}

impl Serialize for Reference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Set(id) => serializer.serialize_str(id),
            Self::Unset => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ReferenceVisitor;

        impl<'de> Visitor<'de> for ReferenceVisitor {
            type Value = Reference;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an entity id string or null")
            }

            fn visit_str<E>(self, v: &str) -> Result<Reference, E>
            where
                E: de::Error,
            {
                Ok(Reference::from_input(v))
            }

            fn visit_none<E>(self) -> Result<Reference, E>
            where
                E: de::Error,
            {
                Ok(Reference::Unset)
            }

            fn visit_unit<E>(self) -> Result<Reference, E>
            where
                E: de::Error,
            {
                Ok(Reference::Unset)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Reference, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(ReferenceVisitor)
            }
        }

        deserializer.deserialize_option(ReferenceVisitor)
    }
}
