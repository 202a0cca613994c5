use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    api::CallbackState,
    config::OAuthSettings,
    errors::SpotifyError,
    info,
    management::TokenManager,
    server::start_callback_server,
    success,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// How long [`auth`] waits for the browser round trip.
pub const AUTH_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the OAuth 2.0 authorization code flow with PKCE.
///
/// 1. Generates a code verifier and its SHA256 challenge
/// 2. Starts the callback server on `oauth.callback_address`
/// 3. Opens the authorization URL in the browser (or prints it)
/// 4. Waits up to [`AUTH_TIMEOUT`] for the callback to exchange the code
/// 5. Persists the token and stops the callback server
///
/// # Errors
///
/// Returns [`SpotifyError::Auth`] when no token arrived in time or the token
/// could not be written to the cache.
pub async fn auth(oauth: &OAuthSettings) -> Result<TokenManager, SpotifyError> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    // store verifier before the browser can hit the callback
    let pkce = Arc::new(Mutex::new(Some(PkceToken {
        code_verifier,
        token: None,
    })));

    let state = CallbackState {
        pkce: Arc::clone(&pkce),
        oauth: oauth.clone(),
    };
    let server = tokio::spawn(async move {
        if let Err(e) = start_callback_server(state).await {
            warning!("OAuth callback server stopped: {}", e);
        }
    });

    let auth_url = authorize_url(oauth, &code_challenge)?;
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    } else {
        info!("Waiting for Spotify authorization in your browser...");
    }

    let token = wait_for_token(pkce).await;
    server.abort();

    let Some(token) = token else {
        return Err(SpotifyError::Auth(
            "Authentication failed or timed out.".to_string(),
        ));
    };

    let token_manager = TokenManager::new(token, oauth.clone());
    token_manager
        .persist()
        .await
        .map_err(|e| SpotifyError::Auth(format!("Failed to save token to cache: {}", e)))?;

    success!("Authentication successful!");
    Ok(token_manager)
}

/// Loads the cached token or, when there is none, runs [`auth`].
pub async fn ensure_token(oauth: &OAuthSettings) -> Result<TokenManager, SpotifyError> {
    match TokenManager::load(oauth.clone()).await {
        Ok(manager) => Ok(manager),
        Err(e) => {
            warning!("No usable cached token ({}), starting authorization.", e);
            auth(oauth).await
        }
    }
}

/// Builds the Spotify authorize URL for the given PKCE challenge.
pub fn authorize_url(oauth: &OAuthSettings, code_challenge: &str) -> Result<Url, SpotifyError> {
    Url::parse_with_params(
        &oauth.auth_url,
        &[
            ("client_id", oauth.credentials.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", oauth.credentials.redirect_uri.as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", oauth.scope.as_str()),
        ],
    )
    .map_err(|e| SpotifyError::Auth(format!("Invalid authorize url: {}", e)))
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < AUTH_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|p| p.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a new access token.
///
/// Spotify may omit `refresh_token` in the answer, in which case the old one
/// stays valid and is carried over.
pub async fn refresh_token(oauth: &OAuthSettings, refresh_token: &str) -> Result<Token, SpotifyError> {
    let response = token_request(
        oauth,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", oauth.credentials.client_id.as_str()),
        ],
    )
    .await?;

    Ok(into_token(response, Some(refresh_token)))
}

/// Exchanges the authorization code from the callback for an access token.
///
/// `verifier` must be the code verifier whose challenge was sent with the
/// authorize request.
pub async fn exchange_code_pkce(
    oauth: &OAuthSettings,
    code: &str,
    verifier: &str,
) -> Result<Token, SpotifyError> {
    let response = token_request(
        oauth,
        &[
            ("grant_type", "authorization_code"),
            ("client_id", oauth.credentials.client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", oauth.credentials.redirect_uri.as_str()),
        ],
    )
    .await?;

    Ok(into_token(response, None))
}

async fn token_request(
    oauth: &OAuthSettings,
    form: &[(&str, &str)],
) -> Result<TokenResponse, SpotifyError> {
    let client = Client::new();
    let mut request = client.post(&oauth.token_url).form(form);
    if let Some(secret) = &oauth.credentials.client_secret {
        request = request.basic_auth(&oauth.credentials.client_id, Some(secret));
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SpotifyError::Status { status, body });
    }

    Ok(response.json::<TokenResponse>().await?)
}

/// Converts a token endpoint answer, keeping `previous_refresh` when the
/// answer carries no refresh token.
pub fn into_token(response: TokenResponse, previous_refresh: Option<&str>) -> Token {
    Token {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default(),
        scope: response.scope,
        expires_in: response.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
