use std::collections::BTreeMap;

use crate::domain::validation::FieldResult;

/// Keys a form can report errors under. Both name inputs share `Name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorField {
    Name,
    Email,
    Phone,
    Dob,
    Password,
    Confirm,
    /// Banner for failures reported by the remote API.
    Api,
}

impl ErrorField {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Dob => "dob",
            Self::Password => "password",
            Self::Confirm => "confirm",
            Self::Api => "api",
        }
    }
}

/// Field key to user-facing message. A missing entry means the field is clean.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<ErrorField, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: ErrorField, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            self.errors.remove(&field);
        } else {
            self.errors.insert(field, message);
        }
    }

    pub fn clear(&mut self, field: ErrorField) {
        self.errors.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    /// Replaces the entry for `field` with the outcome of a validator and
    /// returns whether it passed.
    pub fn record(&mut self, field: ErrorField, result: FieldResult) -> bool {
        match result {
            Ok(()) => {
                self.clear(field);
                true
            }
            Err(kind) => {
                self.set(field, kind.to_string());
                false
            }
        }
    }

    pub fn get(&self, field: ErrorField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Empty string when the field has no error, matching how forms render it.
    pub fn message(&self, field: ErrorField) -> &str {
        self.get(field).unwrap_or_default()
    }

    pub fn contains(&self, field: ErrorField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ErrorField, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}
