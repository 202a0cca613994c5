use std::{collections::HashSet, time::Duration};

use async_trait::async_trait;
use tokio::time::sleep;

use crate::{
    errors::SpotifyError,
    types::{PlaylistItemsResponse, TrackUri},
};

/// Spotify accepts at most this many items per add or read call.
pub const MAX_ITEMS_PER_REQUEST: usize = 100;

/// Pause after every append batch.
pub const BATCH_PAUSE: Duration = Duration::from_millis(200);

/// One page of playlist contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistPage {
    /// Track URIs on this page; entries without a track are left out.
    pub uris: Vec<TrackUri>,
    /// Raw number of items on the page, used to advance the offset.
    pub item_count: usize,
    pub has_next: bool,
}

impl From<PlaylistItemsResponse> for PlaylistPage {
    fn from(response: PlaylistItemsResponse) -> Self {
        let item_count = response.items.len();
        let uris = response
            .items
            .into_iter()
            .filter_map(|item| item.track.and_then(|t| t.uri))
            .map(TrackUri::from_canonical)
            .collect();

        PlaylistPage {
            uris,
            item_count,
            has_next: response.next.is_some(),
        }
    }
}

/// Remote playlist operations the reconciler needs.
#[async_trait]
pub trait PlaylistRemote: Send + Sync {
    async fn playlist_page(
        &self,
        playlist_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<PlaylistPage, SpotifyError>;

    /// Appends `uris` (at most [`MAX_ITEMS_PER_REQUEST`]) to the end of the playlist.
    async fn add_items(&self, playlist_id: &str, uris: &[TrackUri]) -> Result<(), SpotifyError>;
}

/// Outcome of a [`reconcile`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Tracks found in the playlist before syncing.
    pub existing: usize,
    pub appended: usize,
    pub batches: usize,
}

impl SyncReport {
    pub fn is_up_to_date(&self) -> bool {
        self.appended == 0
    }
}

/// Reads the whole playlist, following pages until there is no next one.
pub async fn fetch_playlist_uris<R>(remote: &R, playlist_id: &str) -> Result<Vec<TrackUri>, SpotifyError>
where
    R: PlaylistRemote + ?Sized,
{
    let mut existing = Vec::new();
    let mut offset = 0;

    loop {
        let page = remote
            .playlist_page(playlist_id, offset, MAX_ITEMS_PER_REQUEST)
            .await?;

        existing.extend(page.uris);

        if !page.has_next || page.item_count == 0 {
            break;
        }
        offset += page.item_count;
    }

    Ok(existing)
}

/// Tracks of `desired` that are not in `existing`, in `desired` order.
///
/// A track listed several times in `desired` is returned once.
pub fn missing_tracks(existing: &[TrackUri], desired: &[TrackUri]) -> Vec<TrackUri> {
    let mut seen: HashSet<&TrackUri> = existing.iter().collect();

    desired
        .iter()
        .filter(|uri| seen.insert(*uri))
        .cloned()
        .collect()
}

/// Appends every track of `desired` missing from the playlist.
///
/// Reads the full playlist through [`fetch_playlist_uris`], computes the
/// difference with [`missing_tracks`] and appends the result. Existing items
/// are never removed or reordered, so running it again with the same input
/// appends nothing.
///
/// # Arguments
///
/// * `remote` - Playlist backend, [`SpotifyClient`](crate::spotify::SpotifyClient)
///   in production or an in-memory fake in tests
/// * `playlist_id` - Bare playlist id, without URI or URL decoration
/// * `desired` - Tracks in sheet order; duplicates are appended once
/// * `pause` - Delay after every append call, [`BATCH_PAUSE`] in production
///
/// # Returns
///
/// A [`SyncReport`] with the number of tracks found, appended and the
/// number of append calls made.
///
/// # Batching
///
/// New tracks go to the end of the playlist in `desired` order,
/// [`MAX_ITEMS_PER_REQUEST`] per call. 250 missing tracks become three calls
/// of 100, 100 and 50.
///
/// # Errors
///
/// Returns the first [`SpotifyError`] from reading or appending. Batches sent
/// before the failure stay in the playlist; the next run picks up the rest.
///
/// # Example
///
/// ```rust,ignore
/// let report = reconcile(&client, "37i9dQZF1DX", mapping.order(), BATCH_PAUSE).await?;
/// if report.is_up_to_date() {
///     success!("Playlist already up-to-date.");
/// }
/// ```
pub async fn reconcile<R>(
    remote: &R,
    playlist_id: &str,
    desired: &[TrackUri],
    pause: Duration,
) -> Result<SyncReport, SpotifyError>
where
    R: PlaylistRemote + ?Sized,
{
    let existing = fetch_playlist_uris(remote, playlist_id).await?;
    let to_add = missing_tracks(&existing, desired);

    let mut report = SyncReport {
        existing: existing.len(),
        appended: 0,
        batches: 0,
    };

    for chunk in to_add.chunks(MAX_ITEMS_PER_REQUEST) {
        remote.add_items(playlist_id, chunk).await?;
        report.appended += chunk.len();
        report.batches += 1;
        sleep(pause).await;
    }

    Ok(report)
}
