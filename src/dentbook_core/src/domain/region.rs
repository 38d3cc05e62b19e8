use std::fmt;

use serde::{Deserialize, Serialize};

pub const FALLBACK_REGION: &str = "US";

/// ISO 3166-1 alpha-2 region used to interpret national phone numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionCode(String);

impl RegionCode {
    /// Normalizes to upper case; rejects anything that is not two ASCII letters.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(Self(code.to_ascii_uppercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RegionCode {
    fn default() -> Self {
        Self(FALLBACK_REGION.to_string())
    }
}

impl TryFrom<String> for RegionCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid region code: {value}"))
    }
}

impl From<RegionCode> for String {
    fn from(region: RegionCode) -> Self {
        region.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
