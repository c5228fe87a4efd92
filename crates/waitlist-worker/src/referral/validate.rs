use super::error::ReferralError;

const MAX_EMAIL_LEN: usize = 254;

/// Trims and lowercases `raw`, rejecting anything that is not shaped like an address.
pub fn normalize_email(raw: &str) -> Result<String, ReferralError> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(ReferralError::Validation("Email is required".to_string()));
    }

    let invalid = || ReferralError::Validation("Email address is invalid".to_string());

    if email.len() > MAX_EMAIL_LEN || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(invalid());
    };
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.split('.').any(str::is_empty) {
        return Err(invalid());
    }

    Ok(email)
}

/// Blank codes mean "no code".
pub fn normalize_code(raw: Option<&str>) -> Option<String> {
    raw.map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Alice@X.com ").unwrap(), "alice@x.com");
    }

    #[test]
    fn blank_email_is_required_error() {
        let err = normalize_email("   ").unwrap_err();
        assert_eq!(err.to_string(), "Email is required");
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for bad in [
            "alice",
            "@x.com",
            "alice@",
            "alice@x",
            "alice@.com",
            "alice@x.",
            "a@b@c.com",
            "al ice@x.com",
            "alice@x..com",
            "alice@.x.com",
        ] {
            assert!(
                matches!(normalize_email(bad), Err(ReferralError::Validation(_))),
                "{bad} should be rejected"
            );
        }
        let long = format!("{}@x.com", "a".repeat(260));
        assert!(normalize_email(&long).is_err());
    }

    #[test]
    fn subdomains_are_accepted() {
        assert_eq!(normalize_email("bob@mail.x.co.uk").unwrap(), "bob@mail.x.co.uk");
    }

    #[test]
    fn codes_are_trimmed_and_uppercased() {
        assert_eq!(normalize_code(Some(" alic1234 ")), Some("ALIC1234".to_string()));
        assert_eq!(normalize_code(Some("   ")), None);
        assert_eq!(normalize_code(None), None);
    }
}
