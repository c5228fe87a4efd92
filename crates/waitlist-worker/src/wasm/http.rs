use std::fmt::Display;

use worker::{Headers, Response, Result};

use crate::referral::ReferralError;

fn cors_headers() -> Result<Headers> {
    let headers = Headers::new();

    // The landing page is served from a different origin than the Worker.
    headers.set("Access-Control-Allow-Origin", "*")?;
    headers.set("Access-Control-Allow-Methods", "GET,POST,OPTIONS")?;
    headers.set(
        "Access-Control-Allow-Headers",
        "authorization, x-client-info, apikey, content-type",
    )?;

    Ok(headers)
}

pub fn json_with_cors(mut resp: Response) -> Result<Response> {
    let headers = cors_headers()?;
    let resp_headers = resp.headers_mut();
    for (k, v) in headers.entries() {
        resp_headers.set(&k, &v)?;
    }

    Ok(resp)
}

pub fn json_ok<T: serde::Serialize>(body: &T) -> Result<Response> {
    json_with_cors(Response::from_json(body)?)
}

pub fn error_response(status: u16, message: &str) -> Result<Response> {
    let body = serde_json::json!({ "error": message });
    let resp = Response::from_json(&body)?.with_status(status);
    json_with_cors(resp)
}

pub fn internal_error_response<E: Display>(context: &str, err: &E) -> Result<Response> {
    tracing::error!(error = %err, "{context}");
    error_response(500, "Internal server error")
}

pub fn referral_error_response(context: &str, err: &ReferralError) -> Result<Response> {
    if err.status() >= 500 {
        tracing::error!(error = %err, "{context}");
    }
    error_response(err.status(), &err.public_message())
}

pub fn not_found() -> Result<Response> {
    error_response(404, "Not found")
}

pub fn method_not_allowed() -> Result<Response> {
    error_response(405, "Method not allowed")
}
