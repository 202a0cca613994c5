use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    cli::{connect, load_contributors},
    config::AppConfig,
    error, info,
    spotify::{self, BATCH_PAUSE, PlaylistRemote},
    success,
    types::TrackUri,
};

/// Loads the mapping and appends missing tracks to the playlist, then exits.
pub async fn sync(config: &AppConfig) {
    let mapping = load_contributors(&config.source, &config.columns).await;
    let client = connect(config).await;

    sync_playlist(&client, &config.playlist_id, mapping.order()).await;
}

/// One-time reconciliation shared by `sync` and `serve`.
pub async fn sync_playlist<R>(remote: &R, playlist_id: &str, desired: &[TrackUri])
where
    R: PlaylistRemote + ?Sized,
{
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Syncing {} tracks into playlist...", desired.len()));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = spotify::reconcile(remote, playlist_id, desired, BATCH_PAUSE).await;
    pb.finish_and_clear();

    match result {
        Ok(report) if report.is_up_to_date() => {
            success!("Playlist already up-to-date ({} tracks).", report.existing)
        }
        Ok(report) => {
            info!(
                "Playlist had {} tracks, appended in {} batches.",
                report.existing, report.batches
            );
            success!("Added {} tracks to the playlist.", report.appended);
        }
        Err(e) => error!("Failed to sync playlist: {}", e),
    }
}
