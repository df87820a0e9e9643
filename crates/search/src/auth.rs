//! Short-lived credential handling for OAuth-protected product sources.
//!
//! The token is held in an explicit cache object owned by the client — no
//! ambient module-level state — and expiry is checked against a supplied
//! clock instant so it can be tested without sleeping.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::client::SearchError;

/// A bearer token plus the instant it stops being usable.
#[derive(Debug, Clone)]
pub struct CachedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Client-credentials grant configuration for one token endpoint.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub scope: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Owns the cached token and refreshes it through the credentials when a
/// caller asks after expiry.
pub struct TokenProvider {
    credentials: ClientCredentials,
    http: reqwest::Client,
    cached: Option<CachedToken>,
}

impl TokenProvider {
    pub fn new(credentials: ClientCredentials, http: reqwest::Client) -> Self {
        TokenProvider { credentials, http, cached: None }
    }

    /// The cached token if still valid at `now`, without any I/O.
    pub fn cached_token_at(&self, now: DateTime<Utc>) -> Option<&str> {
        self.cached
            .as_ref()
            .filter(|t| t.is_valid_at(now))
            .map(|t| t.token.as_str())
    }

    /// Insert a token directly. Used after a fetch, and by tests.
    pub fn store(&mut self, token: String, ttl_seconds: i64, now: DateTime<Utc>) {
        self.cached = Some(CachedToken {
            token,
            expires_at: now + Duration::seconds(ttl_seconds),
        });
    }

    /// A valid bearer token, fetching a fresh one when the cache is empty
    /// or expired.
    pub async fn bearer_token(&mut self) -> Result<String, SearchError> {
        let now = Utc::now();
        if let Some(token) = self.cached_token_at(now) {
            return Ok(token.to_string());
        }

        let response = self
            .http
            .post(&self.credentials.token_url)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", self.credentials.scope.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: TokenResponse = response.json().await?;
        tracing::debug!(expires_in = body.expires_in, "refreshed search API token");
        self.store(body.access_token.clone(), body.expires_in, now);
        Ok(body.access_token)
    }
}
