//! # Dentbook - Dental Booking Client Library
//!
//! Facade crate re-exporting the public APIs of the booking client components:
//! form validation, password strength, the registration and login form
//! controllers, the auth client and its session store.
//!
//! ## Structure
//!
//! - **Core domain types**: `User`, `Session`, `Password`, `ValidationErrors`, etc.
//! - **Ports**: `AuthApi`, `SessionStore`, `PhoneNumberValidator`, `RegionDetector`, ...
//! - **Use cases**: `AuthClient`, `RegistrationFormController`, `DashboardUseCase`, ...
//! - **Adapters**: `HttpApiClient`, `FileSessionStore`, `LibPhoneNumberValidator`, ...

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types, validators and value objects
pub mod core {
    pub use dentbook_core::*;
}

pub use dentbook_core::{
    Appointment, AppointmentStatus, Credentials, Doctor, ErrorField, FieldErrorKind, FormField,
    Password, PasswordRequirement, PasswordRequirementReport, RegionCode, RegistrationInput,
    Role, Session, SessionToken, User, ValidationErrors, validate_date_of_birth, validate_email,
    validate_name, validate_password_confirmation, validate_phone,
};

// ============================================================================
// Ports
// ============================================================================

/// Port trait definitions
pub mod ports {
    pub use dentbook_core::{
        ApiError, AppointmentApi, AuthApi, DoctorApi, PhoneNumberValidator, ProfileApi,
        RegionDetector, SessionStore, SessionStoreError,
    };
}

pub use ports::{ApiError, AuthApi, PhoneNumberValidator, SessionStore, SessionStoreError};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use dentbook_application::*;
}

pub use dentbook_application::{
    AuthClient, AuthError, AuthPage, AuthView, DashboardUseCase, FormPhase, ListDoctorsUseCase,
    LoginFormController, RegistrationFormController, SubmitOutcome,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Booking API client
    pub mod http {
        pub use dentbook_adapters::http::*;
    }

    /// Session store implementations
    pub mod persistence {
        pub use dentbook_adapters::persistence::*;
    }

    /// Configuration
    pub mod config {
        pub use dentbook_adapters::config::*;
    }

    pub use dentbook_adapters::{
        IpApiRegionDetector, LibPhoneNumberValidator, telemetry::init_tracing,
    };
}

pub use dentbook_adapters::{
    ClientSettings, FileSessionStore, HttpApiClient, InMemorySessionStore,
    LibPhoneNumberValidator,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
