use worker::*;

#[path = "wasm/db/mod.rs"]
pub mod db;
#[path = "wasm/brevo.rs"]
pub mod brevo;
#[path = "wasm/env.rs"]
pub mod env;
#[path = "wasm/handlers/mod.rs"]
pub mod handlers;
#[path = "wasm/http.rs"]
pub mod http;
#[path = "wasm/logging.rs"]
pub mod logging;

use http::{json_with_cors, not_found};

/// Strips the `/functions/v1` prefix used by the previous hosting so old links keep working.
fn route_path(path: &str) -> &str {
    path.strip_prefix("/functions/v1").unwrap_or(path)
}

#[event(fetch)]
pub async fn fetch(req: Request, env: Env, ctx: Context) -> Result<Response> {
    console_error_panic_hook::set_once();
    logging::init(&env);

    if req.method() == Method::Options {
        let resp = Response::empty()?.with_status(204);
        return json_with_cors(resp);
    }

    let url = req.url()?;
    let path = route_path(url.path());

    if req.method() == Method::Get && path == "/health" {
        let body = serde_json::json!({
            "ok": true,
            "service": "waitlist",
        });
        let resp = Response::from_json(&body)?;
        return json_with_cors(resp);
    }

    if path == "/handle-referral" {
        return handlers::referrals::handle_referral(req, &env, &ctx).await;
    }
    if path == "/get-referral-data" {
        return handlers::referrals::handle_referral_data(req, &env).await;
    }
    if req.method() == Method::Get && path == "/rewards" {
        return handlers::referrals::handle_rewards(&env);
    }

    if req.method() == Method::Post && path == "/v1/admin/migrations/up" {
        return handlers::migrations::handle_migrations_up(&req, &env).await;
    }
    if req.method() == Method::Get && path == "/v1/admin/db/ping" {
        return handlers::admin::handle_db_ping(&req, &env).await;
    }

    not_found()
}
