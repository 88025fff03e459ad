//! Australian business identifiers
//!
//! ABN (Australian Business Number) and ACN (Australian Company Number)
//! validation using the checksum algorithms published by the ABR and ASIC.
//! Both validators strip every non-digit character first, so `51 824 753 556`
//! and `51-824-753-556` normalize to `51824753556`.

use crate::error::IdentifierError;

/// Number of digits in an ABN
pub const ABN_LENGTH: usize = 11;

/// Number of digits in an ACN
pub const ACN_LENGTH: usize = 9;

const ABN_WEIGHTS: [u32; ABN_LENGTH] = [10, 1, 3, 5, 7, 9, 11, 13, 15, 17, 19];
const ABN_MODULUS: u32 = 89;
const ACN_WEIGHTS: [u32; ACN_LENGTH - 1] = [8, 7, 6, 5, 4, 3, 2, 1];

/// Validates an ABN and returns its normalized 11-digit form
///
/// The first digit is decremented by one, each digit is multiplied by its
/// weight, and the ABN is valid iff the weighted sum is divisible by 89.
///
/// # Examples
///
/// ```rust
/// use domain_borrower::business_numbers::validate_abn;
///
/// assert_eq!(validate_abn("51 824 753 556").unwrap(), "51824753556");
/// assert!(validate_abn("51824753557").is_err());
/// ```
pub fn validate_abn(raw: &str) -> Result<String, IdentifierError> {
    let digits = digits_of(raw);
    if digits.len() != ABN_LENGTH {
        return Err(IdentifierError::AbnLength);
    }

    if abn_weighted_sum(&digits) % ABN_MODULUS != 0 {
        return Err(IdentifierError::AbnChecksum);
    }

    Ok(render(&digits))
}

/// Validates an ACN and returns its normalized 9-digit form
///
/// The first eight digits are weighted 8 down to 1; the complement of the
/// weighted sum modulo 10 must equal the ninth digit.
///
/// # Examples
///
/// ```rust
/// use domain_borrower::business_numbers::validate_acn;
///
/// assert_eq!(validate_acn("004-085-616").unwrap(), "004085616");
/// assert!(validate_acn("004085617").is_err());
/// ```
pub fn validate_acn(raw: &str) -> Result<String, IdentifierError> {
    let digits = digits_of(raw);
    if digits.len() != ACN_LENGTH {
        return Err(IdentifierError::AcnLength);
    }

    let (body, check) = digits.split_at(ACN_LENGTH - 1);
    if acn_check_digit(body) != u32::from(check[0]) {
        return Err(IdentifierError::AcnChecksum);
    }

    Ok(render(&digits))
}

/// Returns true if `raw` is a valid ABN
pub fn is_valid_abn(raw: &str) -> bool {
    validate_abn(raw).is_ok()
}

/// Returns true if `raw` is a valid ACN
pub fn is_valid_acn(raw: &str) -> bool {
    validate_acn(raw).is_ok()
}

/// Computes the ACN check digit for the first eight digits
///
/// Digits beyond the eighth are ignored.
pub fn acn_check_digit(body: &[u8]) -> u32 {
    let total: u32 = ACN_WEIGHTS
        .iter()
        .zip(body)
        .map(|(weight, digit)| weight * u32::from(*digit))
        .sum();
    (10 - total % 10) % 10
}

/// Computes the two leading check digits of an ABN for its last nine digits
///
/// Every nine-digit body has exactly one pair of leading digits (first digit
/// 1-9) that satisfies the modulus-89 check.
pub fn abn_check_digits(body: &[u8]) -> Option<(u8, u8)> {
    if body.len() != ABN_LENGTH - 2 {
        return None;
    }
    let rest: u32 = ABN_WEIGHTS[2..]
        .iter()
        .zip(body)
        .map(|(weight, digit)| weight * u32::from(*digit))
        .sum();
    // (d0 - 1) * 10 + d1 must cancel `rest` modulo 89
    let lead = (ABN_MODULUS - rest % ABN_MODULUS) % ABN_MODULUS;
    let first = u8::try_from(lead / 10 + 1).ok()?;
    let second = u8::try_from(lead % 10).ok()?;
    Some((first, second))
}

/// Formats a valid ABN in the conventional `NN NNN NNN NNN` grouping
pub fn format_abn(raw: &str) -> Result<String, IdentifierError> {
    let abn = validate_abn(raw)?;
    Ok(format!("{} {} {} {}", &abn[0..2], &abn[2..5], &abn[5..8], &abn[8..11]))
}

/// Formats a valid ACN in the conventional `NNN NNN NNN` grouping
pub fn format_acn(raw: &str) -> Result<String, IdentifierError> {
    let acn = validate_acn(raw)?;
    Ok(format!("{} {} {}", &acn[0..3], &acn[3..6], &acn[6..9]))
}

fn abn_weighted_sum(digits: &[u8]) -> u32 {
    ABN_WEIGHTS
        .iter()
        .zip(digits)
        .enumerate()
        .map(|(index, (weight, digit))| {
            let digit = u32::from(*digit);
            // Decrement the first digit; adding 89 keeps it unsigned and the sum's residue unchanged
            let digit = if index == 0 { digit + ABN_MODULUS - 1 } else { digit };
            weight * digit
        })
        .sum()
}

fn digits_of(raw: &str) -> Vec<u8> {
    raw.chars()
        .filter_map(|c| c.to_digit(10))
        .filter_map(|d| u8::try_from(d).ok())
        .collect()
}

fn render(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_abn_forms() {
        for abn in ["51824753556", "51 824 753 556", "51-824-753-556"] {
            assert_eq!(validate_abn(abn).unwrap(), "51824753556");
        }
    }

    #[test]
    fn test_abn_checksum_failures() {
        assert_eq!(validate_abn("51824753557"), Err(IdentifierError::AbnChecksum));
        assert_eq!(validate_abn("61824753556"), Err(IdentifierError::AbnChecksum));
    }

    #[test]
    fn test_abn_length_failures() {
        assert_eq!(validate_abn("5182475355"), Err(IdentifierError::AbnLength));
        assert_eq!(validate_abn("518247535561"), Err(IdentifierError::AbnLength));
        assert_eq!(validate_abn("abcdefghijk"), Err(IdentifierError::AbnLength));
    }

    #[test]
    fn test_valid_acn_forms() {
        for acn in ["004085616", "004 085 616", "004-085-616"] {
            assert_eq!(validate_acn(acn).unwrap(), "004085616");
        }
    }

    #[test]
    fn test_acn_failures() {
        assert_eq!(validate_acn("004085617"), Err(IdentifierError::AcnChecksum));
        assert_eq!(validate_acn("104085616"), Err(IdentifierError::AcnChecksum));
        assert_eq!(validate_acn("00408561"), Err(IdentifierError::AcnLength));
        assert_eq!(validate_acn("abcdefghi"), Err(IdentifierError::AcnLength));
    }

    #[test]
    fn test_abn_check_digits_recovers_known_abn() {
        let body = [8, 2, 4, 7, 5, 3, 5, 5, 6];
        assert_eq!(abn_check_digits(&body), Some((5, 1)));
    }

    #[test]
    fn test_leading_zero_abn_checksum() {
        assert_eq!(validate_abn("01824753556"), Err(IdentifierError::AbnChecksum));
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_abn("51824753556").unwrap(), "51 824 753 556");
        assert_eq!(format_acn("004085616").unwrap(), "004 085 616");
    }
}
