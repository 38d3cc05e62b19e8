use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend identifier. The API sends numbers today; strings are accepted so a
/// backend switch to opaque ids does not break stored sessions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        match RawId::deserialize(deserializer)? {
            RawId::Number(id) => Ok(Self::from(id)),
            RawId::Text(id) if !id.trim().is_empty() => Ok(Self(id.trim().to_string())),
            RawId::Text(_) => Err(serde::de::Error::custom("record id must not be empty")),
        }
    }
}

pub type UserId = RecordId;
pub type AppointmentId = RecordId;
