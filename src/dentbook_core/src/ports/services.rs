use async_trait::async_trait;

use crate::domain::region::RegionCode;

/// External phone-number validity check.
pub trait PhoneNumberValidator: Send + Sync {
    /// `number` may be international (`+44...`) or national for `region`.
    fn is_valid(&self, number: &str, region: &RegionCode) -> bool;
}

/// One-shot lookup of the visitor's region, used to preselect the phone
/// country. Implementations decide their own fallback and never fail.
#[async_trait]
pub trait RegionDetector: Send + Sync {
    async fn detect(&self) -> RegionCode;
}
