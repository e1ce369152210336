//! Configuration management for musecli.
//!
//! Values come from environment variables, optionally pre-populated from a
//! `.env` file in the local data directory. Every setting except the Spotify
//! client id has a usable default:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf};

const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:5173/";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5173";
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Returns the musecli directory inside the platform local data directory.
///
/// - Linux: `~/.local/share/musecli`
/// - macOS: `~/Library/Application Support/musecli`
/// - Windows: `%LOCALAPPDATA%/musecli`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("musecli");
    path
}

/// Loads environment variables from `musecli/.env` in the local data directory.
///
/// Creates the directory if needed. A missing `.env` file is fine since all
/// settings can come from the process environment; a present but unreadable
/// one is reported.
///
/// # Example
///
/// ```
/// use musecli::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Returns the address the local redirect server binds to.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify client id used for the implicit-grant authorization.
///
/// # Errors
///
/// Fails when `SPOTIFY_API_AUTH_CLIENT_ID` is unset or blank; there is no
/// sensible default for it.
pub fn spotify_client_id() -> Result<String, String> {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| "SPOTIFY_API_AUTH_CLIENT_ID must be set".to_string())
}

/// Returns the redirect URI registered with the Spotify application.
///
/// This is also the application root: logout navigates back to it.
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Returns the space separated scopes requested during authorization.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").unwrap_or_default()
}

/// Returns the Spotify authorization endpoint.
pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the Spotify Web API base URL, e.g. `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Returns the base URL of the like/unlike service.
///
/// `POST {base}/like` and `POST {base}/unlike` are appended to it.
pub fn backend_url() -> String {
    var_or("MUSE_BACKEND_URL", DEFAULT_BACKEND_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Returns the configured principal id, if any.
///
/// When set it is used to attribute like/unlike notifications instead of
/// asking Spotify for the current profile.
pub fn user_id() -> Option<String> {
    env::var("MUSE_USER_ID")
        .ok()
        .filter(|v| !v.trim().is_empty())
}
