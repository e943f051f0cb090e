use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde::Deserialize;

use crate::{config::Credentials, error::ApiError, notify::Notifier};

/// Seconds shaved off the provider-declared lifetime so a token never expires
/// in the middle of a request.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl Token {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.access_token.is_empty() && now < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Client-credentials token cache. The only state kept across requests is the
/// last token handed out by the accounts service.
pub struct TokenManager {
    http: Client,
    token_url: String,
    creds: Credentials,
    clock: Arc<dyn Clock>,
    token: Option<Token>,
}

impl TokenManager {
    pub fn new(
        http: Client,
        token_url: impl Into<String>,
        creds: Credentials,
        clock: Arc<dyn Clock>,
    ) -> TokenManager {
        Self {
            http,
            token_url: token_url.into(),
            creds,
            clock,
            token: None,
        }
    }

    pub fn cached(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn invalidate(&mut self) {
        self.token = None;
    }

    /// Returns a bearer token, requesting a new one only when the cached token
    /// is missing or expired. Failures are reported through `notifier` and
    /// come back as `None`.
    pub async fn get_token(&mut self, notifier: &dyn Notifier) -> Option<String> {
        let now = self.clock.now();
        if let Some(token) = self.token.as_ref().filter(|t| t.is_valid_at(now)) {
            tracing::debug!(expires_at = %token.expires_at, "using cached spotify token");
            return Some(token.access_token.clone());
        }

        match self.request_token().await {
            Ok(token) => {
                let access_token = token.access_token.clone();
                self.token = Some(token);
                Some(access_token)
            }
            Err(err @ ApiError::UnexpectedStatus { .. }) => {
                tracing::error!(error = %err, "spotify auth failed");
                self.token = None;
                notifier.notice("Failed to authenticate with Spotify.");
                None
            }
            Err(err) => {
                tracing::error!(error = %err, "spotify auth error");
                self.token = None;
                notifier.notice("Error authenticating with Spotify.");
                None
            }
        }
    }

    async fn request_token(&self) -> Result<Token, ApiError> {
        tracing::debug!(url = %self.token_url, "requesting spotify token");
        let res = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.creds.client_id, Some(&self.creds.client_secret))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await?;

        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::UnexpectedStatus { status, body });
        }

        let data: TokenResponse = res.json().await?;
        let expires_at = Duration::try_seconds(data.expires_in.saturating_sub(EXPIRY_MARGIN_SECS))
            .and_then(|lifetime| self.clock.now().checked_add_signed(lifetime))
            .ok_or(ApiError::InvalidExpiry(data.expires_in))?;

        Ok(Token {
            access_token: data.access_token,
            expires_at,
        })
    }
}
