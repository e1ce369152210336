//! Muse command-line client library
//!
//! This library implements a small Spotify catalog client: it obtains an
//! access token through the implicit-grant redirect, searches artists and
//! albums, and keeps the user's "liked" artists and albums in a local
//! write-through cache that is mirrored to a remote like/unlike service.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local authorization callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `location` - Navigation location holding the redirect fragment
//! - `management` - Durable storage, session lifecycle and liked items
//! - `server` - Local HTTP server for the authorization redirect
//! - `sink` - Fire-and-forget propagation of like/unlike changes
//! - `spotify` - Spotify Web API client implementation
//! - `state` - Root application state shared by the commands
//! - `types` - Data structures and type definitions
//! - `utils` - Fragment parsing and other helpers
//!
//! # Example
//!
//! ```
//! use musecli::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> musecli::Res<()> {
//!     config::load_env().await?;
//!     // Use CLI functions...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod location;
pub mod management;
pub mod server;
pub mod sink;
pub mod spotify;
pub mod state;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with Send + Sync bounds so it can
/// cross task boundaries in async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Waiting for the authorization redirect...");
/// info!("Found {} artists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for unrecoverable setup failures at the binary edge. Nothing
/// in the session or liked-items core calls it.
///
/// # Example
///
/// ```
/// error!("Cannot load environment. Err: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for every recoverable failure: corrupt caches, rejected tokens,
/// failed remote like/unlike notifications.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
