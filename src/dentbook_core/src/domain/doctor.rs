use serde::{Deserialize, Serialize};

use crate::domain::id::UserId;

pub const DEFAULT_SPECIALTY: &str = "General";
pub const DEFAULT_DOCTOR_IMAGE: &str = "assets/images/default-doctor.png";

/// Canonical doctor record. Built only by the API adapter's normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub specialty: String,
    pub description: String,
    pub image_url: String,
}

impl Doctor {
    /// `Dr <first> <last>`, or just `Dr` when the backend sent no name.
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            "Dr".to_string()
        } else {
            format!("Dr {name}")
        }
    }

    pub fn booking_path(&self) -> String {
        format!("/appointment?doctor={}", self.id)
    }
}
