use worker::{Context, Env, Method, Request, Response, Result};

use crate::referral::{deliver_referrer_notice, RandomCodes, ReferralLookup, Registrar, SignupRequest};
use crate::worker_wasm::brevo::BrevoMailer;
use crate::worker_wasm::db::registrant_store;
use crate::worker_wasm::env::referral_config;
use crate::worker_wasm::http::{
    error_response, internal_error_response, json_ok, method_not_allowed, referral_error_response,
};

/// `POST /handle-referral` with `{ email, referrer_code? }`.
///
/// The referrer notification is sent after the response through `wait_until`.
pub async fn handle_referral(mut req: Request, env: &Env, ctx: &Context) -> Result<Response> {
    if req.method() != Method::Post {
        return method_not_allowed();
    }

    let payload: SignupRequest = match req.json().await {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid JSON in handle-referral");
            return error_response(400, "Invalid JSON body");
        }
    };

    let store = match registrant_store(env).await {
        Ok(s) => s,
        Err(e) => return internal_error_response("Failed to open libSQL connection", &e),
    };

    let mailer = BrevoMailer::from_env(env);
    let registrar = Registrar::new(store, mailer.clone(), RandomCodes, referral_config(env));

    let signup = match registrar.register_deferred(payload).await {
        Ok(signup) => signup,
        Err(e) => return referral_error_response("Error in handle-referral", &e),
    };

    if let Some(notice) = signup.referrer_notice {
        ctx.wait_until(async move {
            deliver_referrer_notice(&mailer, &notice).await;
        });
    }

    json_ok(&signup.response)
}

/// `GET /get-referral-data?code=...`
pub async fn handle_referral_data(req: Request, env: &Env) -> Result<Response> {
    if req.method() != Method::Get {
        return method_not_allowed();
    }

    let url = req.url()?;
    let code = url
        .query_pairs()
        .find(|(k, _)| k == "code")
        .map(|(_, v)| v.into_owned());

    // Reject before touching the database.
    if code.as_deref().is_none_or(|c| c.trim().is_empty()) {
        return error_response(400, "Referral code is required");
    }

    let store = match registrant_store(env).await {
        Ok(s) => s,
        Err(e) => return internal_error_response("Failed to open libSQL connection", &e),
    };

    match ReferralLookup::new(store).profile(code.as_deref()).await {
        Ok(profile) => json_ok(&profile),
        Err(e) => referral_error_response("Error in get-referral-data", &e),
    }
}

/// `GET /rewards`: configured reward tiers in ascending order.
pub fn handle_rewards(env: &Env) -> Result<Response> {
    let config = referral_config(env);
    json_ok(&serde_json::json!({ "tiers": config.tiers }))
}
