use async_trait::async_trait;

use crate::{errors::SpotifyError, types::CurrentPlayback};

/// Source of the user's current playback state.
#[async_trait]
pub trait PlaybackSource: Send + Sync {
    /// `Ok(None)` when no device is active.
    async fn current_playback(&self) -> Result<Option<CurrentPlayback>, SpotifyError>;
}
