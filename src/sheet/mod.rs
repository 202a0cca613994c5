//! # Sheet Module
//!
//! Turns the contributor spreadsheet into a [`ContributorMap`](crate::types::ContributorMap).
//!
//! Two row sources exist, a local CSV file ([`CsvFileSource`]) and a Google
//! spreadsheet ([`GoogleSheetSource`]). Both implement [`RowSource`] and only
//! differ in where the grid comes from; every row goes through
//! [`parse_rows`], which in turn uses [`normalize_uri`] for the link column.
//!
//! ```rust,ignore
//! let source = CsvFileSource::new("tracks.csv");
//! let mapping = load_mapping(&source, &Columns::default()).await?;
//! ```

mod csv_file;
mod google;
mod loader;
mod normalize;

pub use csv_file::{CsvFileSource, parse_csv};
pub use google::{GoogleSheetSource, SHEETS_API_URL, SheetAuth, a1_range};
pub use loader::{
    Columns, DEFAULT_LINK_COLUMN, DEFAULT_NAME_COLUMN, RowSource, load_mapping, parse_rows,
};
pub use normalize::{normalize_uri, parse_playlist_id};
