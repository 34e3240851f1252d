//! Authentication module
//!
//! Supports: static API keys (header or query) and OAuth2 client credentials.
//!
//! The `Authenticator` applies credentials to requests and keeps one cached
//! bearer token per client instance, refreshing it near expiry.

mod authenticator;
mod cache;
mod types;

pub use authenticator::{Authenticator, BlockingAuthenticator};
pub use cache::{BlockingTokenCache, TokenCache};
pub use types::{
    AuthConfig, AuthPart, Credential, Location, Secret, DEFAULT_TOKEN_LIFETIME_SECS,
    EXPIRY_MARGIN_SECS,
};
