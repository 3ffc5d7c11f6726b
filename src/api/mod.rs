//! # API Module
//!
//! HTTP endpoints of the short-lived local server that completes the video
//! platform's OAuth 2.0 PKCE authorization.
//!
//! - [`callback`] - Receives the authorization code, exchanges it for a token
//!   and hands the token to the waiting `auth` command through the shared state.
//! - [`health`] - Reports status and version, useful to check that the server
//!   is reachable on the configured redirect address.
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use tunesync::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback).layer(Extension(state)))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
