use crate::error::{CoreError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Wire timestamp (call time, response time). RFC 3339 on the wire,
/// UTC `OffsetDateTime` in memory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub OffsetDateTime);

impl Timestamp {
    pub fn new(datetime: OffsetDateTime) -> Self {
        Self(datetime)
    }

    pub fn inner(&self) -> &OffsetDateTime {
        &self.0
    }

    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }

    pub fn unix_timestamp(&self) -> i64 {
        self.0.unix_timestamp()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self
            .0
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(|_| fmt::Error)?;
        write!(f, "{formatted}")
    }
}

impl FromStr for Timestamp {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let datetime = OffsetDateTime::parse(s, &time::format_description::well_known::Rfc3339)
            .map_err(|e| CoreError::invalid_timestamp(format!("'{s}': {e}")))?;
        Ok(Timestamp(datetime))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = self
            .0
            .format(&time::format_description::well_known::Rfc3339)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Timestamp::from_str(&s).map_err(serde::de::Error::custom)
    }
}

pub fn now_utc() -> Timestamp {
    Timestamp(OffsetDateTime::now_utc())
}

pub fn from_unix_timestamp(timestamp: i64) -> Result<Timestamp> {
    let datetime = OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|e| CoreError::invalid_timestamp(format!("unix {timestamp}: {e}")))?;
    Ok(Timestamp(datetime))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_display() {
        let ts = Timestamp::new(datetime!(2025-03-10 08:15:00 UTC));
        assert_eq!(ts.to_string(), "2025-03-10T08:15:00Z");
    }

    #[test]
    fn test_from_str() {
        let ts = Timestamp::from_str("2025-03-10T08:15:00Z").unwrap();
        assert_eq!(ts.0, datetime!(2025-03-10 08:15:00 UTC));
    }

    #[test]
    fn test_from_str_with_offset() {
        let ts = Timestamp::from_str("2025-03-10T10:15:00+02:00").unwrap();
        assert_eq!(
            ts.0.to_offset(time::UtcOffset::UTC),
            datetime!(2025-03-10 08:15:00 UTC)
        );
    }

    #[test]
    fn test_from_str_invalid() {
        assert!(Timestamp::from_str("not-a-date").is_err());
        assert!(Timestamp::from_str("2025-13-01T00:00:00Z").is_err());
        assert!(Timestamp::from_str("").is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let original = Timestamp::new(datetime!(2025-03-10 08:15:00 UTC));
        let json = serde_json::to_string(&original).unwrap();
        assert_eq!(json, "\"2025-03-10T08:15:00Z\"");

        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_deserialize_invalid() {
        assert!(serde_json::from_str::<Timestamp>("\"yesterday\"").is_err());
    }

    #[test]
    fn test_ordering() {
        let earlier = Timestamp::new(datetime!(2025-03-10 08:15:00 UTC));
        let later = Timestamp::new(datetime!(2025-03-10 08:15:01 UTC));
        assert!(earlier < later);
    }

    #[test]
    fn test_now_utc_monotonic_enough() {
        let a = now_utc();
        let b = now_utc();
        assert!(b >= a);
    }

    #[test]
    fn test_from_unix_timestamp() {
        let expected = datetime!(2025-03-10 08:15:00 UTC);
        let ts = from_unix_timestamp(expected.unix_timestamp()).unwrap();
        assert_eq!(ts.0, expected);
    }

    #[test]
    fn test_from_unix_timestamp_invalid() {
        assert!(from_unix_timestamp(i64::MAX).is_err());
    }
}
