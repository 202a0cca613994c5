//! # CLI Module
//!
//! User-facing commands. Each command takes the configuration it needs,
//! already validated by `main`, and reports progress through the crate's
//! `info!`/`success!`/`warning!`/`error!` macros.
//!
//! ## Commands
//!
//! - [`auth`] - runs the Spotify OAuth PKCE flow and caches the token
//! - [`mapping`] - prints the spreadsheet mapping as a table
//! - [`sync`] - appends missing spreadsheet tracks to the playlist once
//! - [`serve`] - syncs once, then serves the now playing page
//!
//! ## Data Flow
//!
//! ```text
//! RowSource (CSV / Google Sheets)
//!     ↓ parse_rows
//! ContributorMap ──→ reconcile (once) ──→ Spotify playlist
//!     ↓
//! AppContext ──→ GET / ──→ PlaybackSource
//! ```
//!
//! Fatal problems (unreadable sheet, missing columns, failed authorization)
//! end the process with `error!`; single bad rows only produce a warning.

mod auth;
mod mapping;
mod serve;
mod sync;

pub use auth::auth;
pub use mapping::mapping;
pub use serve::serve;
pub use sync::{sync, sync_playlist};

use crate::{
    config::{AppConfig, MappingSource},
    error, info,
    sheet::{self, Columns, CsvFileSource, GoogleSheetSource, RowSource},
    spotify::{self, SpotifyClient},
    success,
    types::ContributorMap,
};

/// Picks the row source adapter for the configured origin.
pub fn row_source(source: &MappingSource) -> Box<dyn RowSource> {
    match source {
        MappingSource::Csv(path) => Box::new(CsvFileSource::new(path.clone())),
        MappingSource::GoogleSheet {
            sheet_id,
            tab,
            auth,
        } => Box::new(GoogleSheetSource::new(
            sheet_id.clone(),
            tab.clone(),
            auth.clone(),
        )),
    }
}

async fn load_contributors(source: &MappingSource, columns: &Columns) -> ContributorMap {
    let source = row_source(source);
    info!("Loading contributors from {}", source.describe());

    match sheet::load_mapping(source.as_ref(), columns).await {
        Ok(mapping) => {
            success!(
                "Loaded {} tracks from {} contributors.",
                mapping.len(),
                distinct_contributors(&mapping)
            );
            mapping
        }
        Err(e) => error!("Failed to load contributor mapping: {}", e),
    }
}

async fn connect(config: &AppConfig) -> SpotifyClient {
    match spotify::auth::ensure_token(&config.oauth).await {
        Ok(tokens) => SpotifyClient::new(config.api_url.clone(), tokens),
        Err(e) => error!("{}\nPlease run crowdlist auth", e),
    }
}

fn distinct_contributors(mapping: &ContributorMap) -> usize {
    let mut names: Vec<&String> = mapping.contributors().values().collect();
    names.sort();
    names.dedup();
    names.len()
}
