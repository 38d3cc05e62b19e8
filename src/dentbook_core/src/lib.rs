pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    appointment::{
        Appointment, AppointmentAction, AppointmentStatus, MISSING_VALUE, format_display_date,
    },
    doctor::{DEFAULT_DOCTOR_IMAGE, DEFAULT_SPECIALTY, Doctor},
    id::{AppointmentId, RecordId, UserId},
    password::{Password, PasswordRequirement, PasswordRequirementReport},
    region::RegionCode,
    registration::{Credentials, FormField, RegistrationInput, RegistrationPayload},
    session::{Session, SessionToken},
    user::{Role, User},
    validation::{
        FieldErrorKind, FieldResult, validate_date_of_birth, validate_email, validate_name,
        validate_password_confirmation, validate_phone,
    },
    validation_errors::{ErrorField, ValidationErrors},
};

pub use ports::{
    api::{
        ApiError, AppointmentApi, AuthApi, DoctorApi, ProfileApi, UNEXPECTED_RESPONSE_FORMAT,
    },
    repositories::{SessionStore, SessionStoreError},
    services::{PhoneNumberValidator, RegionDetector},
};
