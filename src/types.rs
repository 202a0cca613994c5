use std::{borrow::Borrow, collections::HashMap, fmt, ops::Deref};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Contributor shown for rows whose name cell is blank.
pub const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Canonical `spotify:track:<id>` identifier.
///
/// Only built through [`crate::sheet::normalize_uri`] or from URIs the
/// Spotify API hands back, so two values compare equal exactly when they name
/// the same track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackUri(String);

impl TrackUri {
    pub const PREFIX: &'static str = "spotify:track:";

    pub(crate) fn from_id(id: &str) -> Self {
        TrackUri(format!("{}{}", Self::PREFIX, id))
    }

    /// Wraps a URI that is already canonical, e.g. one returned by Spotify.
    pub fn from_canonical(uri: impl Into<String>) -> Self {
        TrackUri(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn id(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for TrackUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for TrackUri {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for TrackUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TrackUri {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Track to contributor lookup built from the spreadsheet.
///
/// `order` keeps every accepted row's track in sheet order, which is the
/// order new tracks are appended to the playlist. The lookup itself is
/// last-write-wins on duplicate tracks.
#[derive(Debug, Clone, Default)]
pub struct ContributorMap {
    contributors: HashMap<TrackUri, String>,
    order: Vec<TrackUri>,
}

impl ContributorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, uri: TrackUri, contributor: String) {
        self.order.push(uri.clone());
        self.contributors.insert(uri, contributor);
    }

    pub fn contributor(&self, uri: &str) -> Option<&str> {
        self.contributors.get(uri).map(String::as_str)
    }

    pub fn order(&self) -> &[TrackUri] {
        &self.order
    }

    pub fn contributors(&self) -> &HashMap<TrackUri, String> {
        &self.contributors
    }

    /// Number of distinct tracks.
    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }
}

#[derive(Tabled)]
pub struct MappingTableRow {
    pub position: usize,
    pub contributor: String,
    pub track: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemsResponse {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrackRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackRef {
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurrentPlayback {
    #[serde(default)]
    pub is_playing: bool,
    pub item: Option<PlaybackItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaybackItem {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<PlaybackArtist>,
    pub album: Option<PlaybackAlbum>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaybackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaybackAlbum {
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetValuesResponse {
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpreadsheetResponse {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sheet {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetProperties {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    pub expires_in: u64,
}
