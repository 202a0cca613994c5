use std::path::PathBuf;

use async_trait::async_trait;

use crate::{errors::SheetError, sheet::RowSource};

/// Local delimited file with a header row.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvFileSource { path: path.into() }
    }
}

#[async_trait]
impl RowSource for CsvFileSource {
    async fn rows(&self) -> Result<Vec<Vec<String>>, SheetError> {
        let content =
            async_fs::read_to_string(&self.path)
                .await
                .map_err(|e| SheetError::Io {
                    path: self.path.display().to_string(),
                    source: e,
                })?;

        parse_csv(&content)
    }

    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }
}

/// Splits CSV text into raw rows. The header stays in the output as row 0 and
/// rows may differ in length.
pub fn parse_csv(content: &str) -> Result<Vec<Vec<String>>, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(rows)
}
