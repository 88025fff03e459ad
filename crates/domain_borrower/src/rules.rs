//! Field-level rules shared by the borrower validators

use validator::ValidateEmail;

/// Returns true for a syntactically valid email with a dotted domain
///
/// `validator` accepts single-label domains such as `user@localhost`; borrower
/// contact addresses must have a dotted domain and no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) || !email.validate_email() {
        return false;
    }
    match email.rsplit_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain
                    .split_once('.')
                    .map(|(head, tail)| !head.is_empty() && !tail.is_empty())
                    .unwrap_or(false)
        }
        None => false,
    }
}

/// Returns true if the country name refers to Australia
pub fn is_australia(country: &str) -> bool {
    matches!(country.trim().to_lowercase().as_str(), "australia" | "au" | "aus")
}

/// Australian postcodes are exactly four digits
pub fn is_australian_postal_code(code: &str) -> bool {
    code.len() == 4 && code.chars().all(|c| c.is_ascii_digit())
}

/// Counts the digits in a phone number, ignoring spaces, dashes, brackets and `+`
pub fn phone_digit_count(phone: &str) -> Option<usize> {
    let mut digits = 0;
    for c in phone.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '(' | ')' | '+' => {}
            _ => return None,
        }
    }
    Some(digits)
}
