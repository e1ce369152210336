//! # API Module
//!
//! HTTP endpoints of the local redirect server used during authorization.
//!
//! - [`callback`] - Page the authorization server redirects to. Because the
//!   access token arrives in the URI fragment, which browsers never send to
//!   the server, the page forwards `location.hash` to [`fragment`] and then
//!   strips it from the visible address.
//! - [`fragment`] - Receives the raw fragment and hands it to the waiting
//!   authorization flow through shared state.
//! - [`health`] - Liveness check returning name and version.

mod callback;
mod health;

pub use callback::callback;
pub use callback::fragment;
pub use health::health;
