//! Access to the EasySlip bearer token.

use crate::error::{Error, Result};
use std::fmt;

/// Bearer token for the EasySlip API. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for building the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Source of the bearer token attached to every request.
pub trait CredentialProvider: Send + Sync {
    /// Fetch the current token.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable token is available.
    fn access_token(&self) -> Result<AccessToken>;
}

/// A fixed token, typically from configuration or the environment.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    token: AccessToken,
}

impl StaticCredentials {
    /// Use `token` for every request.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(token),
        }
    }
}

impl CredentialProvider for StaticCredentials {
    fn access_token(&self) -> Result<AccessToken> {
        if self.token.expose().trim().is_empty() {
            return Err(Error::Credentials("access token is empty".to_string()));
        }
        Ok(self.token.clone())
    }
}
