/// ID types for Cadence entities
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Song identifier
///
/// The CMS hands out numeric ids but clients treat them as opaque strings,
/// so both JSON strings and JSON integers deserialize into a `SongId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
    /// Create a new song ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for SongId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SongId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

struct SongIdVisitor;

impl Visitor<'_> for SongIdVisitor {
    type Value = SongId;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or integer song id")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(SongId::new(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(SongId(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(SongId(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(SongId(v.to_string()))
    }
}

impl<'de> Deserialize<'de> for SongId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SongIdVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_string() {
        let id: SongId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn deserializes_from_integer() {
        let id: SongId = serde_json::from_str("17").unwrap();
        assert_eq!(id, SongId::new("17"));
    }

    #[test]
    fn rejects_other_json_types() {
        assert!(serde_json::from_str::<SongId>("true").is_err());
        assert!(serde_json::from_str::<SongId>("null").is_err());
    }

    #[test]
    fn display_honours_width() {
        assert_eq!(format!("{:>4}|", SongId::new("7")), "   7|");
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&SongId::new("9")).unwrap();
        assert_eq!(json, "\"9\"");
    }
}
