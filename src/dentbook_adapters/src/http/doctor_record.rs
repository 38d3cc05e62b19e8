use dentbook_core::{
    ApiError, DEFAULT_DOCTOR_IMAGE, DEFAULT_SPECIALTY, Doctor, UNEXPECTED_RESPONSE_FORMAT, UserId,
};
use serde_json::Value;

const ID_KEYS: [&str; 4] = ["user_id", "id", "userId", "doctorId"];
const FIRST_NAME_KEYS: [&str; 3] = ["first_name", "firstName", "given_name"];
const LAST_NAME_KEYS: [&str; 3] = ["last_name", "lastName", "family_name"];
const SPECIALTY_KEYS: [&str; 3] = ["specialization", "speciality", "specialty"];
const DESCRIPTION_KEYS: [&str; 2] = ["bio", "description"];
const IMAGE_KEYS: [&str; 3] = ["avatar_url", "avatarUrl", "image"];

/// The `data` array of `GET /api/doctor`, each entry normalized.
pub(crate) fn normalize_doctor_list(data: Option<Value>) -> Result<Vec<Doctor>, ApiError> {
    match data {
        Some(Value::Array(records)) => records.iter().map(normalize_doctor).collect(),
        _ => Err(ApiError::MalformedResponse(
            UNEXPECTED_RESPONSE_FORMAT.to_string(),
        )),
    }
}

/// Maps one backend doctor record, whatever naming it uses, onto [`Doctor`].
pub fn normalize_doctor(record: &Value) -> Result<Doctor, ApiError> {
    let id = first_value(record, &ID_KEYS)
        .map(UserId::new)
        .ok_or_else(|| ApiError::MalformedResponse("Doctor record has no id.".to_string()))?;

    let (mut first_name, mut last_name) = (
        first_value(record, &FIRST_NAME_KEYS),
        first_value(record, &LAST_NAME_KEYS),
    );
    if first_name.is_none() || last_name.is_none() {
        if let Some(full_name) = first_value(record, &["name"]) {
            let (first, last) = split_name(&full_name);
            first_name = first_name.or(Some(first));
            last_name = last_name.or(Some(last));
        }
    }

    Ok(Doctor {
        id,
        first_name: first_name.unwrap_or_default(),
        last_name: last_name.unwrap_or_default(),
        specialty: first_value(record, &SPECIALTY_KEYS)
            .unwrap_or_else(|| DEFAULT_SPECIALTY.to_string()),
        description: first_value(record, &DESCRIPTION_KEYS).unwrap_or_default(),
        image_url: first_value(record, &IMAGE_KEYS)
            .unwrap_or_else(|| DEFAULT_DOCTOR_IMAGE.to_string()),
    })
}

/// First key holding a non-blank string or a number.
fn first_value(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match record.get(key)? {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

fn split_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();
    let first = parts.next().unwrap_or_default().to_string();
    let last = parts.collect::<Vec<_>>().join(" ");
    (first, last)
}
