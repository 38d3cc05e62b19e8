pub mod appointment;
pub mod doctor;
pub mod id;
pub mod password;
pub mod region;
pub mod registration;
pub mod session;
pub mod user;
pub mod validation;
pub mod validation_errors;
