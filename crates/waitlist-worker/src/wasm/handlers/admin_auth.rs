use subtle::ConstantTimeEq;
use worker::{Env, Request, Response, Result};

use crate::worker_wasm::env::env_string;
use crate::worker_wasm::http::error_response;

pub fn extract_bearer_token(req: &Request) -> Result<Option<String>> {
    let Some(raw) = req.headers().get("Authorization")? else {
        return Ok(None);
    };

    let raw = raw.trim();
    let Some((scheme, rest)) = raw.split_once(' ') else {
        return Ok(None);
    };
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Ok(None);
    }

    let token = rest.trim();
    if token.is_empty() {
        return Ok(None);
    }

    Ok(Some(token.to_string()))
}

/// Admin endpoints require `Authorization: Bearer $MIGRATIONS_TOKEN`.
///
/// When the token is not configured the endpoints are disabled. Returns `Ok(None)`
/// when authorized; otherwise the response to send.
pub fn ensure_admin_authorized(req: &Request, env: &Env) -> Result<Option<Response>> {
    let Some(required) = env_string(env, "MIGRATIONS_TOKEN") else {
        return Ok(Some(error_response(403, "Admin endpoints are disabled")?));
    };

    let Some(token) = extract_bearer_token(req)? else {
        return Ok(Some(error_response(401, "Missing Authorization Bearer token")?));
    };

    if !bool::from(token.as_bytes().ct_eq(required.as_bytes())) {
        tracing::warn!("Rejected admin request with an invalid token");
        return Ok(Some(error_response(401, "Invalid admin token")?));
    }

    Ok(None)
}
