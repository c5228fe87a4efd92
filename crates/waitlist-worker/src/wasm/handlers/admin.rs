use worker::{Env, Request, Response, Result};

use crate::referral::RegistrantStore;
use crate::worker_wasm::db::registrant_store;
use crate::worker_wasm::http::{internal_error_response, json_ok};

use super::admin_auth::ensure_admin_authorized;

/// Connectivity check that also exercises the registrants table.
pub async fn handle_db_ping(req: &Request, env: &Env) -> Result<Response> {
    if let Some(resp) = ensure_admin_authorized(req, env)? {
        return Ok(resp);
    }

    let store = match registrant_store(env).await {
        Ok(s) => s,
        Err(e) => return internal_error_response("Failed to open libSQL connection", &e),
    };

    if let Err(e) = store.connection().ping().await {
        return internal_error_response("libSQL ping failed", &e);
    }
    if let Err(e) = store.code_exists("").await {
        return internal_error_response("registrants table is not readable", &e);
    }

    json_ok(&serde_json::json!({
        "success": true,
        "db": { "ok": true }
    }))
}
