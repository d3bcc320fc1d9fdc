//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// International phone number regex (E.164 format)
static E164_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").unwrap());

// 10-digit local mobile number as entered in the app's phone screen
static LOCAL_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").unwrap());

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is in valid E.164 format
pub fn is_valid_e164(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    E164_REGEX.is_match(&normalized)
}

/// Check if a string is a valid 10-digit local mobile number
pub fn is_valid_local_mobile(phone: &str) -> bool {
    LOCAL_MOBILE_REGEX.is_match(phone)
}

/// Convert a 10-digit local mobile number to E.164 with the given country
/// code (e.g., "+91"). Returns `None` when the local part is not 10 digits.
pub fn to_e164(country_code: &str, local: &str) -> Option<String> {
    if !is_valid_local_mobile(local) {
        return None;
    }
    let candidate = format!("{}{}", country_code, local);
    is_valid_e164(&candidate).then_some(candidate)
}

/// Mask a phone number for logging (e.g., +15****4567)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
