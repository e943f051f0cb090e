use std::sync::Arc;

use reqwest::{Client, StatusCode};

use crate::{
    config::Credentials,
    error::ApiError,
    notify::Notifier,
    token::{Clock, TokenManager},
    types::{Album, SearchResponse},
};

pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const SPOTIFY_API_BASE: &str = "https://api.spotify.com";

/// Results per search; no further pages are requested.
pub const PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub token_url: String,
    pub api_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: SPOTIFY_TOKEN_URL.to_owned(),
            api_base: SPOTIFY_API_BASE.to_owned(),
        }
    }
}

pub struct CatalogClient {
    api_base: String,
    client: Client,
    tokens: TokenManager,
}

impl CatalogClient {
    pub fn new(endpoints: &Endpoints, creds: Credentials, clock: Arc<dyn Clock>) -> CatalogClient {
        let client = Client::new();
        return CatalogClient {
            api_base: endpoints.api_base.trim_end_matches('/').to_owned(),
            tokens: TokenManager::new(client.clone(), &endpoints.token_url, creds, clock),
            client,
        };
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Albums matching `query`, in provider order. Every failure is reported
    /// through `notifier` and collapses to an empty list.
    pub async fn search(&mut self, query: &str, notifier: &dyn Notifier) -> Vec<Album> {
        if query.is_empty() {
            return Vec::new();
        }

        let token = match self.tokens.get_token(notifier).await {
            Some(token) => token,
            None => return Vec::new(),
        };

        match self.request(query, &token).await {
            Ok(albums) => albums,
            Err(err @ ApiError::UnexpectedStatus { .. }) => {
                tracing::error!(error = %err, query, "spotify search failed");
                notifier.notice("Failed to search Spotify.");
                Vec::new()
            }
            Err(err) => {
                tracing::error!(error = %err, query, "spotify search error");
                notifier.notice("Error searching Spotify.");
                Vec::new()
            }
        }
    }

    async fn request(&self, query: &str, token: &str) -> Result<Vec<Album>, ApiError> {
        let limit = PAGE_SIZE.to_string();
        let res = self
            .client
            .get(format!("{}/v1/search", self.api_base))
            .query(&[("q", query), ("type", "album"), ("limit", limit.as_str())])
            .bearer_auth(token)
            .send()
            .await?;

        let status = res.status();
        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::UnexpectedStatus { status, body });
        }

        let json: SearchResponse = res.json().await?;
        tracing::debug!(query, results = json.albums.items.len(), "spotify search");

        return Ok(json.albums.items);
    }
}
