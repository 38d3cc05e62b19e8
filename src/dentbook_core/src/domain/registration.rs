use crate::domain::{password::Password, validation_errors::ErrorField};

/// Email and password for one login attempt. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: Password,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: Password) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password,
        }
    }
}

/// Inputs of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    FirstName,
    LastName,
    DateOfBirth,
    Phone,
    Email,
    Password,
    ConfirmPassword,
}

impl FormField {
    /// Where errors for this input are reported.
    pub fn error_field(&self) -> ErrorField {
        match self {
            Self::FirstName | Self::LastName => ErrorField::Name,
            Self::DateOfBirth => ErrorField::Dob,
            Self::Phone => ErrorField::Phone,
            Self::Email => ErrorField::Email,
            Self::Password => ErrorField::Password,
            Self::ConfirmPassword => ErrorField::Confirm,
        }
    }
}

/// Raw registration form state, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationInput {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub phone: String,
    pub email: String,
    pub password: Password,
    pub confirm_password: Password,
}

impl RegistrationInput {
    pub fn clear_passwords(&mut self) {
        self.password = Password::empty();
        self.confirm_password = Password::empty();
    }

    /// Trimmed payload for the register call. Drops the confirmation and turns
    /// blank optional fields into `None`.
    pub fn sanitize(&self) -> RegistrationPayload {
        RegistrationPayload {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            dob: non_blank(&self.date_of_birth),
            phone: non_blank(&self.phone),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

/// What `/api/auth/register` receives.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationPayload {
    pub first_name: String,
    pub last_name: String,
    pub dob: Option<String>,
    pub phone: Option<String>,
    pub email: String,
    pub password: Password,
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_trims_and_drops_blank_optionals() {
        let input = RegistrationInput {
            first_name: "  Ada ".to_string(),
            last_name: "Lovelace".to_string(),
            date_of_birth: String::new(),
            phone: "  ".to_string(),
            email: " ada@example.com ".to_string(),
            password: Password::new("Password123!"),
            confirm_password: Password::new("Password123!"),
        };

        let payload = input.sanitize();
        assert_eq!(payload.first_name, "Ada");
        assert_eq!(payload.email, "ada@example.com");
        assert_eq!(payload.dob, None);
        assert_eq!(payload.phone, None);
        assert_eq!(payload.password, Password::new("Password123!"));
    }

    #[test]
    fn test_clear_passwords() {
        let mut input = RegistrationInput {
            password: Password::new("a"),
            confirm_password: Password::new("b"),
            ..Default::default()
        };
        input.clear_passwords();
        assert!(input.password.is_empty());
        assert!(input.confirm_password.is_empty());
    }

    #[test]
    fn test_name_inputs_share_error_slot() {
        assert_eq!(FormField::FirstName.error_field(), ErrorField::Name);
        assert_eq!(FormField::LastName.error_field(), ErrorField::Name);
    }
}
