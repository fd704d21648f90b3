//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Account telephone numbers are 11-digit mainland mobile numbers
static ACCOUNT_TELEPHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^1[3-9]\d{9}$").unwrap()
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Check if a telephone number is usable as an account identifier
pub fn is_valid_account_telephone(phone: &str) -> bool {
    ACCOUNT_TELEPHONE_REGEX.is_match(phone)
}

/// Mask a phone number for display and logs (e.g., 138****5678)
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
