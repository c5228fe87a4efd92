use worker::Env;

use crate::referral::config::{parse_attempts, parse_tiers};
use crate::referral::ReferralConfig;

pub fn normalize_env_value(raw: String) -> String {
    let trimmed = raw.trim();

    if let Some(inner) = trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        return inner.trim().to_string();
    }
    if let Some(inner) = trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
        return inner.trim().to_string();
    }

    trimmed.to_string()
}

/// Reads a var or secret; blank values count as unset.
pub fn env_string(env: &Env, key: &str) -> Option<String> {
    env.var(key)
        .map(|v| v.to_string())
        .or_else(|_| env.secret(key).map(|v| v.to_string()))
        .ok()
        .map(normalize_env_value)
        .filter(|s| !s.is_empty())
}

/// Builds the referral settings; bad values are logged and replaced by defaults.
pub fn referral_config(env: &Env) -> ReferralConfig {
    let mut config = ReferralConfig::default();

    if let Some(url) = env_string(env, "PUBLIC_SITE_URL") {
        config = config.with_site_url(&url);
    }

    if let Some(raw) = env_string(env, "REWARD_TIERS") {
        match parse_tiers(&raw) {
            Ok(tiers) => config.tiers = tiers,
            Err(e) => tracing::warn!(error = %e, "Ignoring REWARD_TIERS"),
        }
    }

    if let Some(raw) = env_string(env, "CODE_MAX_ATTEMPTS") {
        match parse_attempts(&raw) {
            Ok(n) => config.max_code_attempts = n,
            Err(e) => tracing::warn!(error = %e, "Ignoring CODE_MAX_ATTEMPTS"),
        }
    }

    config
}
