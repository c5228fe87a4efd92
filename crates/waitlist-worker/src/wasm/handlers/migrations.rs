use worker::{Env, Request, Response, Result};

use migration::MigratorTrait;

use crate::worker_wasm::db::db_connect;
use crate::worker_wasm::http::{internal_error_response, json_ok};

use super::admin_auth::ensure_admin_authorized;

/// Applies up to `?steps=N` pending migrations (default 1).
///
/// libSQL over HTTP issues one subrequest per statement and Workers cap subrequests,
/// so large schemas are migrated across several calls.
pub async fn handle_migrations_up(req: &Request, env: &Env) -> Result<Response> {
    if let Some(resp) = ensure_admin_authorized(req, env)? {
        return Ok(resp);
    }

    let db = match db_connect(env).await {
        Ok(db) => db,
        Err(e) => return internal_error_response("Failed to open libSQL connection", &e),
    };

    let steps: u32 = req
        .url()
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(k, _)| k == "steps")
                .and_then(|(_, v)| v.parse::<u32>().ok())
        })
        .filter(|n| *n > 0)
        .unwrap_or(1);

    let pending_before = match migration::Migrator::get_pending_migrations(&db).await {
        Ok(p) => p,
        Err(e) => return internal_error_response("Failed to read pending migrations", &e),
    };

    let steps_to_apply = steps.min(u32::try_from(pending_before.len()).unwrap_or(u32::MAX));
    if steps_to_apply > 0 {
        if let Err(e) = migration::Migrator::up(&db, Some(steps_to_apply)).await {
            return internal_error_response("Failed to apply migrations", &e);
        }
        tracing::info!(applied = steps_to_apply, "Applied migrations");
    }

    let pending_after = match migration::Migrator::get_pending_migrations(&db).await {
        Ok(p) => p,
        Err(e) => return internal_error_response("Failed to read pending migrations", &e),
    };

    json_ok(&serde_json::json!({
        "success": true,
        "migrations": {
            "requested_steps": steps,
            "applied_now": pending_before.len().saturating_sub(pending_after.len()),
            "pending": pending_after.len(),
            "done": pending_after.is_empty(),
            "next": pending_after.first().map(|m| m.name()),
        }
    }))
}
