use std::{collections::HashMap, path::PathBuf, time::Duration};

use ::config::{Config, ConfigError, Environment, File, FileFormat};
use dentbook_core::RegionCode;
use serde::{Deserialize, Deserializer, de};
use url::Url;

use crate::config::constants::{defaults, env};

#[derive(Debug, Clone, Deserialize)]
pub struct ClientSettings {
    pub api: ApiSettings,
    pub region: RegionSettings,
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(deserialize_with = "deserialize_base_url")]
    pub base_url: Url,
    pub timeout_in_millis: u64,
}

impl ApiSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegionSettings {
    pub lookup_url: Url,
    pub fallback: RegionCode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub path: PathBuf,
}

impl ClientSettings {
    /// Defaults, then `config/default.json` if present, then `DENTBOOK__*`
    /// environment variables (a `.env` file is loaded first).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_from(defaults::CONFIG_FILE, None)
    }

    /// `environment` replaces the process environment when given.
    fn load_from(
        file: &str,
        environment: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .set_default("api.base_url", defaults::API_BASE_URL)?
            .set_default("api.timeout_in_millis", defaults::API_TIMEOUT_IN_MILLIS)?
            .set_default("region.lookup_url", defaults::REGION_LOOKUP_URL)?
            .set_default("region.fallback", defaults::REGION_FALLBACK)?
            .set_default("session.path", defaults::SESSION_PATH)?
            .add_source(File::new(file, FileFormat::Json).required(false))
            .add_source(
                Environment::with_prefix(env::PREFIX)
                    .prefix_separator(env::SEPARATOR)
                    .separator(env::SEPARATOR)
                    .try_parsing(true)
                    .source(environment),
            )
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}

/// Blank falls back to the default; anything else must be an absolute
/// http(s) URL.
fn deserialize_base_url<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = match raw.trim() {
        "" => defaults::API_BASE_URL,
        trimmed => trimmed,
    };
    parse_base_url(raw).map_err(de::Error::custom)
}

pub fn parse_base_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| format!("invalid API base URL {raw:?}: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(format!("API base URL must use http or https, not {scheme:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn no_file() -> String {
        "does/not/exist.json".to_string()
    }

    #[test]
    fn test_defaults() {
        let settings = ClientSettings::load_from(&no_file(), Some(HashMap::new())).unwrap();

        assert_eq!(settings.api.base_url.as_str(), "http://localhost:3000/");
        assert_eq!(settings.api.timeout(), Duration::from_secs(10));
        assert_eq!(settings.region.fallback.as_str(), "US");
        assert_eq!(
            settings.region.lookup_url.as_str(),
            "http://ip-api.com/json/?fields=countryCode"
        );
        assert_eq!(settings.session.path, PathBuf::from(".dentbook/session.json"));
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"api": {{"base_url": "https://file.example.com/", "timeout_in_millis": 500}}}}"#
        )
        .unwrap();
        let env = HashMap::from([
            (
                "DENTBOOK__API__BASE_URL".to_string(),
                "https://env.example.com/".to_string(),
            ),
            ("DENTBOOK__REGION__FALLBACK".to_string(), "gb".to_string()),
        ]);

        let settings =
            ClientSettings::load_from(file.path().to_str().unwrap(), Some(env)).unwrap();

        assert_eq!(settings.api.base_url.as_str(), "https://env.example.com/");
        assert_eq!(settings.api.timeout_in_millis, 500);
        assert_eq!(settings.region.fallback.as_str(), "GB");
    }

    #[test]
    fn test_invalid_region_is_rejected() {
        let env = HashMap::from([(
            "DENTBOOK__REGION__FALLBACK".to_string(),
            "Narnia".to_string(),
        )]);

        assert!(ClientSettings::load_from(&no_file(), Some(env)).is_err());
    }

    #[test]
    fn test_blank_base_url_uses_default() {
        let env = HashMap::from([("DENTBOOK__API__BASE_URL".to_string(), "  ".to_string())]);

        let settings = ClientSettings::load_from(&no_file(), Some(env)).unwrap();

        assert_eq!(settings.api.base_url.as_str(), "http://localhost:3000/");
    }

    #[test]
    fn test_malformed_base_url_fails_at_load() {
        for bad in ["localhost:3000/api", "not a url", "ftp://example.com"] {
            let env = HashMap::from([("DENTBOOK__API__BASE_URL".to_string(), bad.to_string())]);
            assert!(
                ClientSettings::load_from(&no_file(), Some(env)).is_err(),
                "{bad} should be rejected"
            );
        }
    }
}
