//! Auth configuration types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Credentials expiring within this window are treated as already expired
pub const EXPIRY_MARGIN_SECS: i64 = 30;

/// Token lifetime assumed when the token endpoint omits `expires_in`
pub const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

/// A string that never shows up in logs or debug output
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Secret(String);

impl Secret {
    /// Wrap a secret value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the raw value, for placing it on the wire
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Check if the secret is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Location for API key placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Place in HTTP header
    #[default]
    Header,
    /// Place in query parameter
    Query,
}

/// Authentication configuration for one client instance
#[derive(Debug, Clone, Default)]
pub enum AuthConfig {
    /// No authentication
    #[default]
    None,

    /// Static API key (header or query)
    ApiKey {
        /// Where to place the key
        location: Location,
        /// Header or query parameter name
        name: String,
        /// Prefix to add before the value (e.g. "Client-ID ")
        prefix: Option<String>,
        /// The key itself
        value: Secret,
    },

    /// OAuth2 client-credentials flow (HTTP Basic to the token endpoint)
    Oauth2ClientCredentials {
        /// Token endpoint URL
        token_url: String,
        /// Client ID
        client_id: String,
        /// Client secret
        client_secret: Secret,
        /// Requested scopes
        scopes: Vec<String>,
    },
}

impl AuthConfig {
    /// API key sent as a header
    pub fn header(name: impl Into<String>, value: impl Into<Secret>) -> Self {
        Self::ApiKey {
            location: Location::Header,
            name: name.into(),
            prefix: None,
            value: value.into(),
        }
    }

    /// API key sent as a header with a value prefix
    pub fn prefixed_header(
        name: impl Into<String>,
        prefix: impl Into<String>,
        value: impl Into<Secret>,
    ) -> Self {
        Self::ApiKey {
            location: Location::Header,
            name: name.into(),
            prefix: Some(prefix.into()),
            value: value.into(),
        }
    }

    /// OAuth2 client credentials without scopes
    pub fn client_credentials(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<Secret>,
    ) -> Self {
        Self::Oauth2ClientCredentials {
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scopes: Vec::new(),
        }
    }

    /// Whether any credential is configured
    pub fn is_configured(&self) -> bool {
        !matches!(self, AuthConfig::None)
    }

    /// Auth part for static credentials; `None` for no auth or token flows
    pub(crate) fn static_part(&self) -> Option<AuthPart> {
        match self {
            AuthConfig::ApiKey {
                location,
                name,
                prefix,
                value,
            } => {
                let value = Secret::new(format!(
                    "{}{}",
                    prefix.as_deref().unwrap_or(""),
                    value.expose()
                ));
                Some(match location {
                    Location::Header => AuthPart::Header {
                        name: name.clone(),
                        value,
                    },
                    Location::Query => AuthPart::Query {
                        name: name.clone(),
                        value,
                    },
                })
            }
            _ => None,
        }
    }
}

/// A resolved piece of authentication to attach to one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPart {
    /// Header name and value
    Header { name: String, value: Secret },
    /// Query parameter name and value
    Query { name: String, value: Secret },
}

impl AuthPart {
    /// Bearer authorization header
    pub fn bearer(token: &Secret) -> Self {
        Self::Header {
            name: "Authorization".to_string(),
            value: Secret::new(format!("Bearer {}", token.expose())),
        }
    }
}

/// Bearer credential with expiration
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// The access token
    pub token: Secret,
    /// When the token expires; `None` means never
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Create a new credential
    pub fn new(token: impl Into<Secret>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Create a credential that expires in N seconds from now
    ///
    /// A lifetime past the representable date range never expires.
    pub fn expires_in(token: impl Into<Secret>, seconds: i64) -> Self {
        Self {
            token: token.into(),
            expires_at: chrono::Duration::try_seconds(seconds)
                .and_then(|lifetime| Utc::now().checked_add_signed(lifetime)),
        }
    }

    /// Check if the credential is expired (with the safety margin)
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Check expiry against an explicit clock reading
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now + chrono::Duration::seconds(EXPIRY_MARGIN_SECS) >= expires_at,
            None => false,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &self.token)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_credential_not_expired() {
        let credential = Credential::expires_in("test", 3600);
        assert!(!credential.is_expired());
    }

    #[test]
    fn test_credential_expired() {
        let credential = Credential::expires_in("test", -100);
        assert!(credential.is_expired());
    }

    #[test]
    fn test_credential_within_margin_is_expired() {
        let credential = Credential::expires_in("test", EXPIRY_MARGIN_SECS - 5);
        assert!(credential.is_expired());
    }

    #[test]
    fn test_credential_lifetime_out_of_range_never_expires() {
        let credential = Credential::expires_in("test", 9_000_000_000_000_000);
        assert!(credential.expires_at.is_none());
        assert!(!credential.is_expired());

        let credential = Credential::expires_in("test", i64::MAX);
        assert!(credential.expires_at.is_none());
    }

    #[test]
    fn test_credential_no_expiration() {
        let credential = Credential::new("test", None);
        assert!(!credential.is_expired());
    }

    #[test]
    fn test_secret_is_redacted() {
        let secret = Secret::new("hunter2");
        assert_eq!(format!("{secret:?}"), "Secret(***)");
        assert_eq!(secret.to_string(), "***");
        assert_eq!(secret.expose(), "hunter2");

        let credential = Credential::new("tok-abc", None);
        assert!(!format!("{credential:?}").contains("tok-abc"));

        let config = AuthConfig::client_credentials("https://x/token", "id", "shh");
        assert!(!format!("{config:?}").contains("shh"));
    }

    #[test]
    fn test_static_part() {
        let config = AuthConfig::prefixed_header("Authorization", "Client-ID ", "key");
        assert_eq!(
            config.static_part(),
            Some(AuthPart::Header {
                name: "Authorization".to_string(),
                value: Secret::new("Client-ID key"),
            })
        );

        let config = AuthConfig::ApiKey {
            location: Location::Query,
            name: "apikey".to_string(),
            prefix: None,
            value: Secret::new("k"),
        };
        assert!(matches!(config.static_part(), Some(AuthPart::Query { .. })));

        assert!(AuthConfig::None.static_part().is_none());
        assert!(!AuthConfig::None.is_configured());
    }
}
