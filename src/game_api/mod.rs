//! HTTP client for the Gladiator Arena game API
//!
//! The bot only reads from the API: one player lookup and one leaderboard
//! query. A single `reqwest::Client` is built at startup and cloned into
//! every handler; all requests share its timeout.

pub mod models;

use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub use models::{GameData, LeaderboardEntry, LeaderboardResponse, PlayerProfile, PlayerSnapshot};

/// Errors that can occur while talking to the game API.
///
/// Non-success status codes are not errors at this level; callers receive
/// them through [`PlayerLookup`] / [`LeaderboardLookup`] and decide how to
/// present them.
#[derive(Error, Debug)]
pub enum GameApiError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    /// Response body could not be decoded as the expected JSON.
    #[error("failed to decode response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },

    /// The configured base URL cannot take path segments.
    #[error("base URL cannot be extended with a path: {0}")]
    InvalidBaseUrl(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, GameApiError>;

/// Outcome of a player lookup
#[derive(Debug)]
pub enum PlayerLookup {
    /// The API knows this player
    Found(Box<PlayerSnapshot>),
    /// Any non-200 answer: the user has not started the game yet
    NotFound(StatusCode),
}

/// Outcome of a leaderboard query
#[derive(Debug)]
pub enum LeaderboardLookup {
    Ranked(Vec<LeaderboardEntry>),
    /// The API answered with a non-200 status
    Unavailable(StatusCode),
}

/// Read-only client for the game REST API
#[derive(Debug, Clone)]
pub struct GameApiClient {
    http: Client,
    base_url: Url,
}

impl GameApiClient {
    /// Creates a client for `base_url` (e.g. `https://host/api`) with the given request timeout
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        let http = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GameApiError::Client)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET {base}/player/{user_id}`
    pub async fn fetch_player(&self, user_id: u64) -> Result<PlayerLookup> {
        let url = self.endpoint(&["player", &user_id.to_string()])?;
        let response = self.get(&url).await?;

        let status = response.status();
        if status != StatusCode::OK {
            log::debug!("Player {} lookup answered {}", user_id, status);
            return Ok(PlayerLookup::NotFound(status));
        }

        let snapshot = response
            .json::<PlayerSnapshot>()
            .await
            .map_err(|source| GameApiError::Decode {
                url: url.to_string(),
                source,
            })?;
        Ok(PlayerLookup::Found(Box::new(snapshot)))
    }

    /// `GET {base}/leaderboard?limit={limit}`
    pub async fn fetch_leaderboard(&self, limit: usize) -> Result<LeaderboardLookup> {
        let mut url = self.endpoint(&["leaderboard"])?;
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        let response = self.get(&url).await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Ok(LeaderboardLookup::Unavailable(status));
        }

        let body = response
            .json::<LeaderboardResponse>()
            .await
            .map_err(|source| GameApiError::Decode {
                url: url.to_string(),
                source,
            })?;
        Ok(LeaderboardLookup::Ranked(body.leaderboard))
    }

    async fn get(&self, url: &Url) -> Result<reqwest::Response> {
        log::debug!("GET {}", url);
        self.http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| GameApiError::Http {
                url: url.to_string(),
                source,
            })
    }

    /// Appends path segments to the base URL, keeping its existing path (`/api`)
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GameApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
