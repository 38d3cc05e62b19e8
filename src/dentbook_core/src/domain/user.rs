use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::id::UserId;

/// Profile of the signed-in visitor, as returned by the auth and user endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub is_doctor: bool,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn role(&self) -> Role {
        if self.is_doctor {
            Role::Doctor
        } else {
            Role::Patient
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Doctor,
    Patient,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Doctor => "doctor",
            Self::Patient => "patient",
        })
    }
}

// The backend stores the doctor flag as a tinyint.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<RawFlag>::deserialize(deserializer)? {
        Some(RawFlag::Bool(value)) => value,
        Some(RawFlag::Int(value)) => value == 1,
        None => false,
    })
}
