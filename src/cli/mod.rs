//! # CLI Module
//!
//! User-facing commands. Each one borrows the root [`crate::state::AppState`]
//! built in `main`, so session resolution and the liked-items cache load
//! happen once per invocation before any command runs.
//!
//! ## Commands
//!
//! - [`auth`] - Sign in through the implicit-grant redirect
//! - [`logout`] - Forget the stored token and return to the application root
//! - [`status`] - Show whether a session exists and how many items are liked
//! - [`search`] - Search artists and albums, marking liked ones
//! - [`like`] - Toggle the liked state of one artist or album
//! - [`likes`] - List liked items
//!
//! ## Error Handling
//!
//! Catalog and remote failures are reported with `warning!` and never end
//! the session. Only unusable input to `auth` stops the program.

mod auth;
mod likes;
mod search;

pub use auth::auth;
pub use auth::logout;
pub use auth::status;
pub use likes::like;
pub use likes::likes;
pub use search::search;
