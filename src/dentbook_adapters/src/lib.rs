pub mod config;
pub mod http;
pub mod persistence;
pub mod phone;
pub mod region;
pub mod telemetry;

pub use config::{ClientSettings, parse_base_url};
pub use http::{HttpApiClient, normalize_doctor};
pub use persistence::{FileSessionStore, InMemorySessionStore};
pub use phone::LibPhoneNumberValidator;
pub use region::IpApiRegionDetector;
pub use telemetry::init_tracing;
