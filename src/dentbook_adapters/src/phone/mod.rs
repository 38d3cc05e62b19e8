use dentbook_core::{PhoneNumberValidator, RegionCode};
use phonenumber::country;

/// Phone validation backed by the libphonenumber metadata bundled with the
/// `phonenumber` crate. National numbers are read in the given region.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibPhoneNumberValidator;

impl PhoneNumberValidator for LibPhoneNumberValidator {
    fn is_valid(&self, number: &str, region: &RegionCode) -> bool {
        let country = region.as_str().parse::<country::Id>().ok();
        phonenumber::parse(country, number.trim())
            .map(|parsed| phonenumber::is_valid(&parsed))
            .unwrap_or(false)
    }
}
