pub mod constants;
pub mod settings;

pub use settings::{ApiSettings, ClientSettings, RegionSettings, SessionSettings, parse_base_url};
