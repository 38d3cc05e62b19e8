pub mod api_client;
pub mod doctor_record;

pub use api_client::HttpApiClient;
pub use doctor_record::normalize_doctor;
