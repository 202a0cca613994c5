use tabled::Table;

use crate::{
    cli::load_contributors,
    config::MappingSource,
    info,
    sheet::Columns,
    types::MappingTableRow,
};

/// Prints the spreadsheet mapping in playlist order without contacting Spotify.
pub async fn mapping(source: &MappingSource, columns: &Columns) {
    let mapping = load_contributors(source, columns).await;

    let rows: Vec<MappingTableRow> = mapping
        .order()
        .iter()
        .enumerate()
        .map(|(idx, uri)| MappingTableRow {
            position: idx + 1,
            contributor: mapping.contributor(uri).unwrap_or_default().to_string(),
            track: uri.to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
    info!(
        "{} rows, {} distinct tracks",
        mapping.order().len(),
        mapping.len()
    );
}
