pub mod env {
    pub const PREFIX: &str = "DENTBOOK";
    pub const SEPARATOR: &str = "__";
}

pub mod defaults {
    pub const CONFIG_FILE: &str = "config/default.json";
    pub const API_BASE_URL: &str = "http://localhost:3000";
    pub const API_TIMEOUT_IN_MILLIS: u64 = 10_000;
    pub const REGION_LOOKUP_URL: &str = "http://ip-api.com/json/?fields=countryCode";
    pub const REGION_FALLBACK: &str = "US";
    pub const SESSION_PATH: &str = ".dentbook/session.json";
}
