//! Request/response tracing for diagnostics.
//!
//! Emits one DEBUG event per exchange with the bearer token redacted and any
//! `access_token` in the body masked. The formatting work is guarded by
//! `tracing::enabled!` so nothing runs when the target is not being logged.

use super::LOG_TARGET;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::fmt::Write;

/// Dump one full exchange at DEBUG, if anyone is listening.
pub(super) fn dump_exchange(
    method: &Method,
    url: &str,
    request_headers: &[(&str, String)],
    request_body: Option<&Value>,
    status: StatusCode,
    response_headers: &HeaderMap,
    response_body: &str,
) {
    if !tracing::enabled!(target: LOG_TARGET, tracing::Level::DEBUG) {
        return;
    }
    let dump = format_exchange(
        method,
        url,
        request_headers,
        request_body,
        status,
        response_headers,
        response_body,
    );
    tracing::debug!(target: LOG_TARGET, "{dump}");
}

fn format_exchange(
    method: &Method,
    url: &str,
    request_headers: &[(&str, String)],
    request_body: Option<&Value>,
    status: StatusCode,
    response_headers: &HeaderMap,
    response_body: &str,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Request {}[{}]: {method} {url}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    );
    for (name, value) in request_headers {
        if name.eq_ignore_ascii_case("authorization") {
            let _ = writeln!(out, "  {name}: Bearer ***");
        } else {
            let _ = writeln!(out, "  {name}: {value}");
        }
    }
    if let Some(body) = request_body {
        let _ = writeln!(out, "  --- body ---");
        indent_pretty(&mut out, body);
    }
    let _ = writeln!(out, " Response");
    for (name, value) in response_headers {
        let _ = writeln!(out, "  {name}: {}", value.to_str().unwrap_or("<binary>"));
    }
    if !response_body.is_empty() {
        let _ = writeln!(out, "  --- response body ---");
        match serde_json::from_str::<Value>(response_body) {
            Ok(mut value) => {
                // token responses must never land in logs verbatim
                if let Some(token) = value.get_mut("access_token") {
                    *token = Value::String("***".to_string());
                }
                indent_pretty(&mut out, &value);
            }
            Err(_) => {
                for line in response_body.lines() {
                    let _ = writeln!(out, "  {line}");
                }
            }
        }
    }
    let _ = write!(out, " ---- end ----");
    out
}

fn indent_pretty(out: &mut String, value: &Value) {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    for line in pretty.lines() {
        let _ = writeln!(out, "  {line}");
    }
}
