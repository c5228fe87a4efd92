use super::tiers::{default_tiers, validate_tiers, RewardTier};

pub const DEFAULT_SITE_URL: &str = "http://localhost:5173";
pub const DEFAULT_MAX_CODE_ATTEMPTS: u32 = 10;
pub const DEFAULT_WIDE_CODE_ATTEMPTS: u32 = 3;

/// Runtime settings for the referral workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralConfig {
    /// Base URL of the landing page, without trailing slash.
    pub site_url: String,
    /// Sorted by ascending threshold.
    pub tiers: Vec<RewardTier>,
    pub max_code_attempts: u32,
    pub wide_code_attempts: u32,
}

impl Default for ReferralConfig {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_SITE_URL.to_string(),
            tiers: default_tiers(),
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
            wide_code_attempts: DEFAULT_WIDE_CODE_ATTEMPTS,
        }
    }
}

impl ReferralConfig {
    pub fn with_site_url(mut self, url: &str) -> Self {
        let url = url.trim().trim_end_matches('/');
        if !url.is_empty() {
            self.site_url = url.to_string();
        }
        self
    }

    pub fn dashboard_link(&self, code: &str) -> String {
        format!("{}/thank-you?code={code}", self.site_url)
    }

    pub fn share_link(&self, code: &str) -> String {
        format!("{}/?ref={code}", self.site_url)
    }
}

/// Parses a JSON array of tiers, e.g. `[{"threshold":1,"title":"Sticker pack"}]`.
pub fn parse_tiers(raw: &str) -> Result<Vec<RewardTier>, String> {
    let tiers: Vec<RewardTier> =
        serde_json::from_str(raw).map_err(|e| format!("invalid reward tiers JSON: {e}"))?;
    validate_tiers(&tiers)?;
    Ok(tiers)
}

/// Reads an attempt bound; zero and garbage are rejected.
pub fn parse_attempts(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("attempt count must be a positive integer, got {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dashboard() {
        let cfg = ReferralConfig::default();
        let thresholds: Vec<i64> = cfg.tiers.iter().map(|t| t.threshold).collect();
        assert_eq!(thresholds, vec![1, 5, 10]);
        assert_eq!(cfg.max_code_attempts, 10);
    }

    #[test]
    fn links_are_built_from_site_url() {
        let cfg = ReferralConfig::default().with_site_url("https://join.example.com/");
        assert_eq!(
            cfg.dashboard_link("ALIC1234"),
            "https://join.example.com/thank-you?code=ALIC1234"
        );
        assert_eq!(cfg.share_link("ALIC1234"), "https://join.example.com/?ref=ALIC1234");
    }

    #[test]
    fn blank_site_url_keeps_default() {
        let cfg = ReferralConfig::default().with_site_url("  ");
        assert_eq!(cfg.site_url, DEFAULT_SITE_URL);
    }

    #[test]
    fn tiers_parse_from_json() {
        let tiers = parse_tiers(
            r#"[{"threshold":1,"title":"Stickers"},{"threshold":4,"title":"Shirt","description":"Any size"}]"#,
        )
        .unwrap();
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[1].description, "Any size");
        assert_eq!(tiers[0].description, "");
    }

    #[test]
    fn unsorted_tiers_are_rejected() {
        assert!(parse_tiers(r#"[{"threshold":4,"title":"b"},{"threshold":1,"title":"a"}]"#).is_err());
        assert!(parse_tiers("not json").is_err());
    }

    #[test]
    fn attempts_must_be_positive() {
        assert_eq!(parse_attempts(" 25 "), Ok(25));
        assert!(parse_attempts("0").is_err());
        assert!(parse_attempts("-3").is_err());
        assert!(parse_attempts("ten").is_err());
    }
}
