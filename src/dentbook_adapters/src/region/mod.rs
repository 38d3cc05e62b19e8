use dentbook_core::{RegionCode, RegionDetector};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

/// Region lookup against an ip-api style endpoint answering
/// `{"countryCode": "GB"}`. Any failure yields the fallback region.
#[derive(Debug, Clone)]
pub struct IpApiRegionDetector {
    http_client: Client,
    lookup_url: Url,
    fallback: RegionCode,
}

impl IpApiRegionDetector {
    pub fn new(lookup_url: Url, fallback: RegionCode, http_client: Client) -> Self {
        Self {
            http_client,
            lookup_url,
            fallback,
        }
    }

    async fn lookup(&self) -> Result<RegionCode, String> {
        let response: LookupResponse = self
            .http_client
            .get(self.lookup_url.clone())
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?
            .json()
            .await
            .map_err(|e| e.to_string())?;

        response
            .country_code
            .as_deref()
            .and_then(RegionCode::parse)
            .ok_or_else(|| "response carried no usable country code".to_string())
    }
}

#[async_trait::async_trait]
impl RegionDetector for IpApiRegionDetector {
    #[tracing::instrument(name = "IpApiRegionDetector::detect", skip(self))]
    async fn detect(&self) -> RegionCode {
        match self.lookup().await {
            Ok(region) => region,
            Err(e) => {
                tracing::warn!(error = %e, fallback = %self.fallback, "Region lookup failed");
                self.fallback.clone()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResponse {
    country_code: Option<String>,
}
