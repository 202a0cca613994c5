use std::collections::HashMap;

use crate::types::{ContributorMap, CurrentPlayback};

/// Shown when the playing track is not in the spreadsheet.
pub const UNKNOWN_CONTRIBUTOR: &str = "someone";

/// Everything the page shows about the track that is playing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub track_name: String,
    /// Artist names joined with `", "`.
    pub artists: String,
    pub contributor: String,
    pub cover_url: Option<String>,
    pub contributor_image: Option<String>,
}

impl NowPlaying {
    /// Builds the page model, or `None` when nothing is playing or the
    /// playback state has no current item.
    pub fn from_playback(
        playback: Option<&CurrentPlayback>,
        mapping: &ContributorMap,
        contributor_images: &HashMap<String, String>,
    ) -> Option<Self> {
        let playback = playback.filter(|p| p.is_playing)?;
        let item = playback.item.as_ref()?;

        let contributor = mapping
            .contributor(&item.uri)
            .unwrap_or(UNKNOWN_CONTRIBUTOR)
            .to_string();

        let cover_url = item
            .album
            .as_ref()
            .and_then(|album| album.images.first())
            .map(|image| image.url.clone());

        Some(NowPlaying {
            track_name: item.name.clone(),
            artists: item
                .artists
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            contributor_image: contributor_images.get(&contributor).cloned(),
            contributor,
            cover_url,
        })
    }
}
