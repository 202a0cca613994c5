use async_trait::async_trait;

use crate::{
    errors::SheetError,
    sheet::normalize_uri,
    types::{ANONYMOUS, ContributorMap},
    warning,
};

pub const DEFAULT_NAME_COLUMN: &str = "name";
pub const DEFAULT_LINK_COLUMN: &str = "spotify_link";

/// Header names of the two columns the loader reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    pub name: String,
    pub link: String,
}

impl Default for Columns {
    fn default() -> Self {
        Columns {
            name: DEFAULT_NAME_COLUMN.to_string(),
            link: DEFAULT_LINK_COLUMN.to_string(),
        }
    }
}

/// Anything that can hand over the raw spreadsheet grid, header row first.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn rows(&self) -> Result<Vec<Vec<String>>, SheetError>;

    /// Short human readable origin, used in log lines.
    fn describe(&self) -> String;
}

/// Reads all rows from `source` and turns them into a [`ContributorMap`].
///
/// The source only delivers the raw grid; validation, link normalization and
/// the anonymous fallback all happen in [`parse_rows`], so CSV files and
/// Google sheets behave the same.
///
/// # Arguments
///
/// * `source` - Where the grid comes from, e.g. a [`CsvFileSource`](crate::sheet::CsvFileSource)
///   or a [`GoogleSheetSource`](crate::sheet::GoogleSheetSource)
/// * `columns` - Header names of the contributor and link columns
///
/// # Returns
///
/// The mapping with every accepted row, in sheet order. An empty sheet
/// yields an empty mapping.
///
/// # Errors
///
/// - Any error of the source itself (I/O, HTTP, authentication)
/// - [`SheetError::Schema`] when a configured column is missing
///
/// # Example
///
/// ```rust,ignore
/// let source = CsvFileSource::new("tracks.csv");
/// let mapping = load_mapping(&source, &Columns::default()).await?;
/// info!("{} distinct tracks", mapping.len());
/// ```
pub async fn load_mapping(
    source: &dyn RowSource,
    columns: &Columns,
) -> Result<ContributorMap, SheetError> {
    let rows = source.rows().await?;
    parse_rows(&rows, columns)
}

/// Builds the contributor mapping from a header row plus data rows.
///
/// Short rows and rows without a link are skipped silently, rows with a link
/// that cannot be normalized are skipped with a warning. Blank names become
/// [`ANONYMOUS`].
///
/// # Errors
///
/// Returns [`SheetError::Schema`] when the header lacks one of `columns`.
pub fn parse_rows(rows: &[Vec<String>], columns: &Columns) -> Result<ContributorMap, SheetError> {
    let mut mapping = ContributorMap::new();

    let Some((header, data)) = rows.split_first() else {
        return Ok(mapping);
    };

    let name_idx = column_index(header, &columns.name)?;
    let link_idx = column_index(header, &columns.link)?;
    let required = name_idx.max(link_idx) + 1;

    for (line, row) in data.iter().enumerate() {
        if row.len() < required {
            continue;
        }

        let link = row[link_idx].trim();
        if link.is_empty() {
            continue;
        }

        let uri = match normalize_uri(link) {
            Ok(uri) => uri,
            Err(e) => {
                // +2: one for the header, one for 1-based sheet rows
                warning!("Skipping row {}: {}", line + 2, e);
                continue;
            }
        };

        let contributor = match row[name_idx].trim() {
            "" => ANONYMOUS.to_string(),
            name => name.to_string(),
        };

        mapping.insert(uri, contributor);
    }

    Ok(mapping)
}

fn column_index(header: &[String], column: &str) -> Result<usize, SheetError> {
    header
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
        .ok_or_else(|| SheetError::Schema(column.to_string()))
}
