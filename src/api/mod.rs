//! # API Module
//!
//! HTTP endpoints served by crowdlist.
//!
//! ## Display server
//!
//! - [`now_playing`] - `GET /`, the auto-refreshing now playing page. Reads the
//!   shared [`AppContext`](crate::context::AppContext) from router state.
//! - [`health`] - `GET /health`, status and version for monitoring.
//!
//! ## OAuth callback server
//!
//! - [`callback`] - `GET /callback`, completes the PKCE flow by exchanging
//!   the authorization code for a token. Only runs during authorization.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use crowdlist::api::{health, now_playing};
//!
//! let app = Router::new()
//!     .route("/", get(now_playing))
//!     .route("/health", get(health))
//!     .with_state(ctx);
//! ```

mod callback;
mod health;
mod now_playing;

pub use callback::{CallbackState, callback};
pub use health::health;
pub use now_playing::{PlaybackUnavailable, now_playing};
