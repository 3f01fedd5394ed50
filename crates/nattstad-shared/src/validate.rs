//! Credential validation helpers.
//!
//! These are pure predicates; turning a failed check into a user-facing
//! error is the command layer's job.

use crate::constants::PIN_LENGTH;

/// Characters counted as "special" by the password policy.
const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// PINs rejected as too guessable even though they pass the format check.
const COMMON_PINS: &[&str] = &["123456", "654321", "123123", "000111", "111000"];

/// A password must contain at least one uppercase letter and one special
/// character.
pub fn password_meets_policy(password: &str) -> bool {
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_special = password.chars().any(|c| SPECIAL_CHARS.contains(c));
    has_uppercase && has_special
}

/// A PIN is exactly six ASCII digits.
pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() == PIN_LENGTH && pin.chars().all(|c| c.is_ascii_digit())
}

/// Rejects trivially guessable PINs: a single repeated digit, any run of
/// ascending or descending digits, and a short list of common choices.
pub fn is_simple_pin(pin: &str) -> bool {
    let mut chars = pin.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }
    if "0123456789".contains(pin) || "9876543210".contains(pin) {
        return true;
    }
    COMMON_PINS.contains(&pin)
}
