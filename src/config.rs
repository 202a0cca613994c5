//! Configuration management for crowdlist.
//!
//! Values come from environment variables, optionally pre-filled from `.env`
//! files. Everything is read once at startup into plain structs
//! ([`AppConfig`], [`OAuthSettings`], [`MappingSource`]) which are then passed
//! around explicitly; nothing else in the crate reads the environment.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)
//!
//! The `from_lookup` constructors take the variable source as a closure so
//! they can be fed from a map in tests.

use std::{
    collections::HashMap,
    env,
    net::SocketAddr,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::{
    errors::ConfigError,
    sheet::{Columns, DEFAULT_LINK_COLUMN, DEFAULT_NAME_COLUMN, SheetAuth, parse_playlist_id},
};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_SCOPE: &str =
    "playlist-modify-public playlist-modify-private user-read-playback-state";
pub const DEFAULT_CREDS_JSON: &str = "spotify_creds.json";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_DISPLAY_ADDRESS: &str = "0.0.0.0:5000";

/// Loads environment variables from `.env` files.
///
/// Reads `<data_local_dir>/crowdlist/.env` first and then a `.env` in the
/// working directory. Neither file is required; variables that are already
/// set are never overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/crowdlist/.env`
/// - macOS: `~/Library/Application Support/crowdlist/.env`
/// - Windows: `%LOCALAPPDATA%/crowdlist/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(&path).ok();
    dotenv::dotenv().ok();
    Ok(())
}

/// Platform specific directory holding `.env` and the token cache.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("crowdlist");
    path
}

/// Reads a variable from the process environment.
pub fn env_lookup(name: &str) -> Option<String> {
    env::var(name).ok()
}

/// Spotify application credentials.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpotifyCredentials {
    pub client_id: String,
    /// Only needed for confidential clients; PKCE works without it.
    #[serde(default)]
    pub client_secret: Option<String>,
    pub redirect_uri: String,
}

/// Reads `client_id`, `client_secret` and `redirect_uri` from a JSON file.
pub async fn load_spotify_creds(path: &str) -> Result<SpotifyCredentials, ConfigError> {
    let content = async_fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::File {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::File {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

/// Everything needed to run the OAuth flow and refresh tokens.
#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub credentials: SpotifyCredentials,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    /// Where the temporary OAuth callback server binds.
    pub callback_address: SocketAddr,
}

impl OAuthSettings {
    pub async fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let credentials = match (get("SPOTIFY_CLIENT_ID"), get("SPOTIFY_REDIRECT_URI")) {
            (Some(client_id), Some(redirect_uri)) => SpotifyCredentials {
                client_id,
                client_secret: get("SPOTIFY_CLIENT_SECRET"),
                redirect_uri,
            },
            _ => {
                let path = get("SPOTIFY_CREDS_JSON").unwrap_or_else(|| DEFAULT_CREDS_JSON.into());
                if !async_fs::metadata(&path).await.is_ok_and(|m| m.is_file()) {
                    return Err(ConfigError::Missing(
                        "Spotify credentials missing: set SPOTIFY_CLIENT_ID and \
                         SPOTIFY_REDIRECT_URI or SPOTIFY_CREDS_JSON"
                            .to_string(),
                    ));
                }
                load_spotify_creds(&path).await?
            }
        };

        Ok(OAuthSettings {
            credentials,
            scope: get("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SPOTIFY_SCOPE.into()),
            auth_url: get("SPOTIFY_API_AUTH_URL")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_AUTH_URL.into()),
            token_url: get("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_TOKEN_URL.into()),
            callback_address: parse_addr(
                "SERVER_ADDRESS",
                get("SERVER_ADDRESS").as_deref().unwrap_or(DEFAULT_SERVER_ADDRESS),
            )?,
        })
    }
}

/// Where the contributor spreadsheet is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingSource {
    Csv(PathBuf),
    GoogleSheet {
        sheet_id: String,
        tab: Option<String>,
        auth: SheetAuth,
    },
}

impl MappingSource {
    /// `CSV_PATH` wins over `GOOGLE_SHEET_ID`. A sheet needs either
    /// `GOOGLE_SERVICE_JSON` or `GOOGLE_API_KEY`, the service account is
    /// preferred when both are set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(path) = get("CSV_PATH") {
            return Ok(MappingSource::Csv(PathBuf::from(path)));
        }

        let Some(sheet_id) = get("GOOGLE_SHEET_ID") else {
            return Err(ConfigError::Missing(
                "Specify GOOGLE_SHEET_ID or CSV_PATH".to_string(),
            ));
        };

        let auth = match (get("GOOGLE_SERVICE_JSON"), get("GOOGLE_API_KEY")) {
            (Some(path), _) => SheetAuth::ServiceAccount(PathBuf::from(path)),
            (None, Some(key)) => SheetAuth::ApiKey(key),
            (None, None) => {
                return Err(ConfigError::Missing(
                    "Provide GOOGLE_SERVICE_JSON or GOOGLE_API_KEY".to_string(),
                ));
            }
        };

        Ok(MappingSource::GoogleSheet {
            sheet_id,
            tab: get("GOOGLE_SHEET_TAB"),
            auth,
        })
    }
}

/// Reads `NAME_COLUMN` and `LINK_COLUMN`, falling back to `name` and
/// `spotify_link`.
pub fn columns_from_lookup<F>(lookup: F) -> Columns
where
    F: Fn(&str) -> Option<String>,
{
    let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
    Columns {
        name: get("NAME_COLUMN").unwrap_or_else(|| DEFAULT_NAME_COLUMN.into()),
        link: get("LINK_COLUMN").unwrap_or_else(|| DEFAULT_LINK_COLUMN.into()),
    }
}

/// Full configuration of the `sync` and `serve` commands.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bare playlist id, already stripped of URI or URL decoration.
    pub playlist_id: String,
    pub api_url: String,
    pub display_address: SocketAddr,
    pub source: MappingSource,
    pub columns: Columns,
    pub contributor_images: Option<PathBuf>,
    pub oauth: OAuthSettings,
}

impl AppConfig {
    pub async fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup).await
    }

    pub async fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let Some(raw_playlist) = get("SPOTIFY_PLAYLIST_ID") else {
            return Err(ConfigError::Missing(
                "Missing env vars: SPOTIFY_PLAYLIST_ID".to_string(),
            ));
        };
        let playlist_id = parse_playlist_id(&raw_playlist).map_err(|e| ConfigError::Invalid {
            name: "SPOTIFY_PLAYLIST_ID".to_string(),
            reason: e.to_string(),
        })?;

        let source = MappingSource::from_lookup(&lookup)?;
        let oauth = OAuthSettings::from_lookup(&lookup).await?;

        Ok(AppConfig {
            playlist_id,
            api_url: get("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.into()),
            display_address: parse_addr(
                "DISPLAY_ADDRESS",
                get("DISPLAY_ADDRESS").as_deref().unwrap_or(DEFAULT_DISPLAY_ADDRESS),
            )?,
            source,
            columns: columns_from_lookup(&lookup),
            contributor_images: get("CONTRIBUTOR_IMAGES_JSON").map(PathBuf::from),
            oauth,
        })
    }
}

/// Reads a JSON object mapping contributor names to avatar image URLs.
pub async fn load_contributor_images(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let file_error = |reason: String| ConfigError::File {
        path: path.display().to_string(),
        reason,
    };

    let content = async_fs::read_to_string(path)
        .await
        .map_err(|e| file_error(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| file_error(e.to_string()))
}

fn parse_addr(name: &str, value: &str) -> Result<SocketAddr, ConfigError> {
    SocketAddr::from_str(value).map_err(|e| ConfigError::Invalid {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
