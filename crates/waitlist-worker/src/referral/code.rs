//! Referral code derivation.
//!
//! A short code is up to four uppercase letters taken from the email's local part
//! followed by a four digit suffix, e.g. `ALIC4821`. The wide form carries eight
//! digits and is only used once short candidates keep colliding.

use crate::util::random_in_range;

pub const PREFIX_LEN: usize = 4;
pub const FALLBACK_PREFIX: &str = "REF";

/// Letters-only, uppercased, truncated prefix for `email`.
pub fn code_prefix(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let prefix: String = local
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .take(PREFIX_LEN)
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if prefix.is_empty() {
        FALLBACK_PREFIX.to_string()
    } else {
        prefix
    }
}

/// Pure derivation: the caller supplies the random part.
pub fn derive_code(email: &str, suffix: u32) -> String {
    format!("{}{suffix}", code_prefix(email))
}

pub fn is_short_code(code: &str) -> bool {
    if !code.is_ascii() {
        return false;
    }
    let split = code.len().saturating_sub(4);
    let (letters, digits) = code.split_at(split);
    (1..=PREFIX_LEN).contains(&letters.len())
        && letters.chars().all(|c| c.is_ascii_uppercase())
        && digits.len() == 4
        && digits.chars().all(|c| c.is_ascii_digit())
        && !digits.starts_with('0')
}

/// Source of candidate codes. The registrar owns the collision loop.
pub trait CodeGenerator {
    fn short_code(&self, email: &str) -> String;

    fn wide_code(&self, email: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodes;

impl CodeGenerator for RandomCodes {
    fn short_code(&self, email: &str) -> String {
        derive_code(email, random_in_range(1000, 9999))
    }

    fn wide_code(&self, email: &str) -> String {
        derive_code(email, random_in_range(10_000_000, 99_999_999))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_uses_first_four_letters_of_local_part() {
        assert_eq!(code_prefix("alice@x.com"), "ALIC");
        assert_eq!(code_prefix("bo@x.com"), "BO");
        assert_eq!(code_prefix("j.doe+promo@x.com"), "JDOE");
    }

    #[test]
    fn prefix_falls_back_when_local_part_has_no_letters() {
        assert_eq!(code_prefix("1234@x.com"), FALLBACK_PREFIX);
        assert_eq!(code_prefix("@x.com"), FALLBACK_PREFIX);
    }

    #[test]
    fn derive_appends_suffix() {
        assert_eq!(derive_code("alice@x.com", 4821), "ALIC4821");
        assert_eq!(derive_code("bo@x.com", 1000), "BO1000");
    }

    #[test]
    fn random_short_codes_have_the_short_shape() {
        for _ in 0..200 {
            let code = RandomCodes.short_code("alice@x.com");
            assert!(is_short_code(&code), "{code}");
            assert!(code.starts_with("ALIC"));
        }
    }

    #[test]
    fn wide_codes_carry_eight_digits() {
        let code = RandomCodes.wide_code("alice@x.com");
        assert_eq!(code.len(), 12);
        assert!(code[4..].chars().all(|c| c.is_ascii_digit()));
        assert!(!is_short_code(&code));
    }

    #[test]
    fn short_code_shape_rejects_malformed_input() {
        assert!(is_short_code("ALIC1000"));
        assert!(is_short_code("B9999"));
        assert!(!is_short_code("1234"));
        assert!(!is_short_code("alic1234"));
        assert!(!is_short_code("ALICE1234"));
        assert!(!is_short_code("ALIC0999"));
        assert!(!is_short_code("ALIC123"));
    }
}
