//! # Spotify Integration Module
//!
//! Thin client for the parts of the Spotify Web API musecli needs. The
//! catalog is a read-only query service here; nothing in this module ever
//! changes session or liked-items state.
//!
//! ```text
//! CLI Layer
//!     ↓
//! Spotify Integration Layer
//!     ├── Authorization (implicit grant, local redirect server)
//!     ├── Search / Lookup (artists and albums)
//!     └── Profile (current user, for attributing likes)
//!     ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Error Handling
//!
//! Every request returns a [`CatalogError`]. `401 Unauthorized` gets its own
//! variant so callers can tell a rejected token apart from other failures;
//! neither ends the session. `502 Bad Gateway` responses are retried a few
//! times after a short pause.

pub mod auth;
pub mod profile;
pub mod search;

use std::{fmt, time::Duration};

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug)]
pub enum CatalogError {
    InvalidRequest(String),
    Unauthorized,
    Request(reqwest::Error),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.status() == Some(StatusCode::UNAUTHORIZED) {
            CatalogError::Unauthorized
        } else {
            CatalogError::Request(err)
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::InvalidRequest(msg) => write!(f, "invalid request: {}", msg),
            CatalogError::Unauthorized => f.write_str("access token was rejected (401)"),
            CatalogError::Request(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CatalogError {}

/// GETs `url` with bearer authentication and decodes the JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
    token: &str,
) -> Result<T, CatalogError> {
    let mut attempt = 1;

    loop {
        let response = client
            .get(url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;

        match response.error_for_status() {
            Ok(valid_response) => return Ok(valid_response.json::<T>().await?),
            Err(err) => {
                if err.status() == Some(StatusCode::BAD_GATEWAY) && attempt < MAX_ATTEMPTS {
                    attempt += 1;
                    sleep(RETRY_DELAY).await;
                    continue; // retry
                }
                return Err(err.into());
            }
        }
    }
}
