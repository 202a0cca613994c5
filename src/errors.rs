use thiserror::Error;

/// Errors raised while reading the contributor spreadsheet.
#[derive(Debug, Error)]
pub enum SheetError {
    /// A link cell looked like a track link but no track id could be extracted.
    #[error("Malformed track link: {0}")]
    Validation(String),

    /// The header row lacks a configured column.
    #[error("Missing expected column: {0}")]
    Schema(String),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Google Sheets request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Google Sheets authentication failed: {0}")]
    Auth(String),
}

/// Errors raised while collecting configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Missing(String),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: String, reason: String },

    #[error("Cannot read {path}: {reason}")]
    File { path: String, reason: String },
}

/// Errors raised while talking to the Spotify Web API.
#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("Spotify request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Spotify answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Spotify authentication failed: {0}")]
    Auth(String),

    #[error("Unexpected response from Spotify: {0}")]
    Decode(String),
}
