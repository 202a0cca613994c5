use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::sync::Mutex;

use crate::{
    errors::SpotifyError,
    management::TokenManager,
    spotify::{PlaybackSource, PlaylistPage, PlaylistRemote},
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CurrentPlayback,
        PlaylistItemsResponse, TrackUri,
    },
};

/// Projection asked for when reading playlist contents.
pub const PLAYLIST_ITEM_FIELDS: &str = "items(track(uri)),next";

/// Thin Spotify Web API client shared by the reconciler and the web page.
///
/// Implements [`PlaylistRemote`] for the one-time sync and [`PlaybackSource`]
/// for the now playing page. Every request carries the current access token
/// as a bearer header.
///
/// # Token Handling
///
/// The [`TokenManager`] sits behind an async mutex. Each request asks it for
/// a valid token, which refreshes and persists the token when it is close to
/// expiry, so concurrent page requests trigger at most one refresh.
///
/// # Error Handling
///
/// - Transport failures become [`SpotifyError::Http`]
/// - Non-success answers become [`SpotifyError::Status`] with the body text
/// - A playback body that is not valid JSON becomes [`SpotifyError::Decode`]
///
/// Nothing is retried.
///
/// # Example
///
/// ```rust,ignore
/// let tokens = spotify::auth::ensure_token(&config.oauth).await?;
/// let client = SpotifyClient::new(config.api_url.clone(), tokens);
/// let playback = client.current_playback().await?;
/// ```
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(api_url: String, tokens: TokenManager) -> Self {
        SpotifyClient {
            http: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            tokens: Mutex::new(tokens),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, SpotifyError> {
        let token = self.tokens.lock().await.get_valid_token().await;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpotifyError::Status { status, body });
        }

        Ok(response)
    }
}

#[async_trait]
impl PlaylistRemote for SpotifyClient {
    async fn playlist_page(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<PlaylistPage, SpotifyError> {
        let url = format!(
            "{api}/playlists/{id}/tracks",
            api = self.api_url,
            id = playlist_id
        );
        let request = self.http.get(&url).query(&[
            ("fields", PLAYLIST_ITEM_FIELDS.to_string()),
            ("additional_types", "track".to_string()),
            ("offset", offset.to_string()),
            ("limit", limit.to_string()),
        ]);

        let page = self.send(request).await?.json::<PlaylistItemsResponse>().await?;
        Ok(PlaylistPage::from(page))
    }

    async fn add_items(&self, playlist_id: &str, uris: &[TrackUri]) -> Result<(), SpotifyError> {
        let url = format!(
            "{api}/playlists/{id}/tracks",
            api = self.api_url,
            id = playlist_id
        );
        let body = AddTrackToPlaylistRequest {
            uris: uris.iter().map(|u| u.to_string()).collect(),
        };

        self.send(self.http.post(&url).json(&body))
            .await?
            .json::<AddTrackToPlaylistResponse>()
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PlaybackSource for SpotifyClient {
    async fn current_playback(&self) -> Result<Option<CurrentPlayback>, SpotifyError> {
        let url = format!("{api}/me/player", api = self.api_url);
        let request = self.http.get(&url).query(&[("additional_types", "track")]);

        let response = self.send(request).await?;
        // 204 means no active device
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice::<CurrentPlayback>(&bytes)
            .map(Some)
            .map_err(|e| SpotifyError::Decode(e.to_string()))
    }
}
