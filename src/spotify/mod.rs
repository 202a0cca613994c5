//! # Spotify Integration Module
//!
//! Everything crowdlist needs from the Spotify Web API: the OAuth flow, a
//! small HTTP client, the playlist reconciler and the playback lookup.
//!
//! ## Architecture
//!
//! ```text
//! CLI (sync, serve)           Display page
//!        ↓                         ↓
//!   reconcile()            PlaybackSource
//!        ↓                         ↓
//!   PlaylistRemote ──── SpotifyClient ──── TokenManager
//!                              ↓
//!                       Spotify Web API
//! ```
//!
//! [`PlaylistRemote`] and [`PlaybackSource`] are the seams: the reconciler and
//! the web handler only see these traits, [`SpotifyClient`] implements both
//! against the real API and tests plug in in-memory fakes.
//!
//! ## Authentication
//!
//! [`auth`] implements the OAuth 2.0 authorization code flow with PKCE:
//! 1. **Code Verifier Generation**: random 128 character verifier
//! 2. **Challenge Creation**: SHA256 challenge derived from the verifier
//! 3. **Authorization Request**: user is sent to Spotify with the challenge
//! 4. **Local Callback**: authorization code arrives at the callback server
//! 5. **Token Exchange**: code + verifier are exchanged for a token
//! 6. **Token Storage**: token is cached in the local data directory
//!
//! ## API Coverage
//!
//! - `GET /playlists/{id}/tracks` - paginated playlist contents (`fields` projection)
//! - `POST /playlists/{id}/tracks` - append up to 100 tracks
//! - `GET /me/player` - current playback state
//! - `POST /api/token` - token exchange and refresh
//!
//! ## Rate Limits
//!
//! Appends are spaced by a fixed [`BATCH_PAUSE`]. There is no retry logic;
//! any non-success status is returned as [`SpotifyError::Status`](crate::errors::SpotifyError::Status).

pub mod auth;
mod client;
mod player;
mod playlist;

pub use client::{PLAYLIST_ITEM_FIELDS, SpotifyClient};
pub use player::PlaybackSource;
pub use playlist::{
    BATCH_PAUSE, MAX_ITEMS_PER_REQUEST, PlaylistPage, PlaylistRemote, SyncReport,
    fetch_playlist_uris, missing_tracks, reconcile,
};
