use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::{id::AppointmentId, user::Role};

pub const MISSING_VALUE: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentStatus {
    Confirmed,
    Completed,
    Cancelled,
    /// Anything the backend sends that this client does not know about.
    Other(String),
}

impl AppointmentStatus {
    pub fn parse(status: &str) -> Self {
        match status.trim().to_lowercase().as_str() {
            "confirmed" => Self::Confirmed,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(status.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other(status) => status,
        }
    }

    /// Capitalized for badges.
    pub fn label(&self) -> String {
        let mut chars = self.as_str().chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AppointmentStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AppointmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::parse(&String::deserialize(deserializer)?))
    }
}

/// What the signed-in user may do with a confirmed appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentAction {
    Complete,
    Cancel,
}

impl AppointmentAction {
    pub fn resulting_status(&self) -> AppointmentStatus {
        match self {
            Self::Complete => AppointmentStatus::Completed,
            Self::Cancel => AppointmentStatus::Cancelled,
        }
    }

    pub fn allowed_for(&self, role: Role) -> bool {
        matches!(
            (self, role),
            (Self::Complete, Role::Doctor) | (Self::Cancel, Role::Patient)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(alias = "appointment_id")]
    pub id: AppointmentId,
    #[serde(default)]
    pub doctor_name: Option<String>,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// The other party: the patient for doctors, the doctor for patients.
    pub fn counterpart_name(&self, viewer: Role) -> &str {
        let name = match viewer {
            Role::Doctor => self.patient_name.as_deref(),
            Role::Patient => self.doctor_name.as_deref(),
        };
        name.filter(|name| !name.is_empty()).unwrap_or(MISSING_VALUE)
    }

    pub fn is_actionable(&self) -> bool {
        self.status == AppointmentStatus::Confirmed
    }

    /// The single action offered to `viewer`, if the appointment is still open.
    pub fn available_action(&self, viewer: Role) -> Option<AppointmentAction> {
        if !self.is_actionable() {
            return None;
        }
        Some(match viewer {
            Role::Doctor => AppointmentAction::Complete,
            Role::Patient => AppointmentAction::Cancel,
        })
    }

    pub fn reschedule_path(&self) -> String {
        format!("/appointment?appointmentId={}", self.id)
    }
}

/// `2025-10-01T09:00:00Z` -> `01/10/2025`. Empty input renders as a dash;
/// anything unparseable is returned unchanged.
pub fn format_display_date(date: &str) -> String {
    if date.trim().is_empty() {
        return MISSING_VALUE.to_string();
    }

    let day_part = date.split('T').next().unwrap_or(date);
    let mut parts = day_part.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day))
            if !year.is_empty() && !month.is_empty() && !day.is_empty() =>
        {
            format!("{day}/{month}/{year}")
        }
        _ => date.to_string(),
    }
}
