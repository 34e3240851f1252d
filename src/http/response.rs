//! Response classification
//!
//! Maps a non-success HTTP status onto the crate error taxonomy. Shared by
//! the async and blocking transports so both classify identically.

use crate::error::Error;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use std::time::Duration;

/// Classify a failed response
///
/// `resource` names what was requested (used in not-found messages) and
/// `body` is the response text, kept for generic API failures.
pub fn classify_status(status: StatusCode, headers: &HeaderMap, resource: &str, body: String) -> Error {
    match status {
        StatusCode::UNAUTHORIZED => Error::auth(format!(
            "Request to {resource} was rejected (401). Check your credentials."
        )),
        StatusCode::NOT_FOUND => Error::not_found(resource),
        StatusCode::TOO_MANY_REQUESTS => Error::rate_limited(retry_after(headers)),
        _ => Error::api(status.as_u16(), truncate_body(body)),
    }
}

/// Extract the server wait hint from a 429 response
///
/// Reads `Retry-After` (whole seconds) first, then Reddit's
/// `x-ratelimit-reset`. Unparseable values count as absent.
pub fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    ["retry-after", "x-ratelimit-reset"]
        .iter()
        .find_map(|name| header_seconds(headers, name))
}

fn header_seconds(headers: &HeaderMap, name: &str) -> Option<Duration> {
    let raw = headers.get(name)?.to_str().ok()?.trim();
    // x-ratelimit-reset is sent as a float ("12.0")
    let secs: f64 = raw.parse().ok()?;
    if secs.is_finite() && secs >= 0.0 {
        Some(Duration::from_secs(secs.ceil() as u64))
    } else {
        None
    }
}

fn truncate_body(mut body: String) -> String {
    const MAX_BODY: usize = 512;
    if body.len() > MAX_BODY {
        let mut cut = MAX_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
        body.push_str("...");
    }
    body
}
