//! HTTP transport module
//!
//! Async and blocking clients sharing one request pipeline.
//!
//! # Features
//!
//! - **Rate-limit retry**: bounded exponential backoff on 429, honoring
//!   `Retry-After` / `x-ratelimit-reset` as a floor
//! - **Error classification**: 401, 404 and 429 map onto distinct error kinds
//! - **Authentication**: integration with the auth module

mod blocking;
mod client;
mod rate_limit;
mod response;

pub use blocking::BlockingHttpClient;
pub use client::{HttpClient, RequestConfig};
pub use rate_limit::{RetryPolicy, RetryState};
pub use response::{classify_status, retry_after};

#[cfg(test)]
mod tests;
