use std::path::PathBuf;

use chrono::Utc;

use crate::{config, config::OAuthSettings, spotify, types::Token, warning};

/// Seconds before expiry at which a token is already treated as expired.
pub const REFRESH_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    token: Token,
    oauth: OAuthSettings,
}

impl TokenManager {
    pub fn new(token: Token, oauth: OAuthSettings) -> Self {
        TokenManager { token, oauth }
    }

    pub async fn load(oauth: OAuthSettings) -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token, oauth })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and persisting it first when it is
    /// about to expire. A failed refresh keeps the old token.
    pub async fn get_valid_token(&mut self) -> String {
        if is_expired(&self.token, Utc::now().timestamp() as u64) {
            match spotify::auth::refresh_token(&self.oauth, &self.token.refresh_token).await {
                Ok(new_token) => {
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        warning!("Failed to save refreshed token: {}", e);
                    }
                }
                Err(e) => warning!("Failed to refresh access token: {}", e),
            }
        }

        self.token.access_token.clone()
    }

    fn token_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        path
    }
}

/// `true` once `now` is within [`REFRESH_MARGIN_SECS`] of the token's expiry.
pub fn is_expired(token: &Token, now: u64) -> bool {
    let expires_at = token.obtained_at + token.expires_in;
    now >= expires_at.saturating_sub(REFRESH_MARGIN_SECS)
}
