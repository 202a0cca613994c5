use std::{collections::HashMap, path::PathBuf};

use crowdlist::{
    config::{
        AppConfig, DEFAULT_SPOTIFY_API_URL, DEFAULT_SPOTIFY_SCOPE, MappingSource, OAuthSettings,
        columns_from_lookup, load_contributor_images, load_spotify_creds,
    },
    errors::ConfigError,
    sheet::SheetAuth,
};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

fn temp_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("crowdlist-{}-{}", std::process::id(), name));
    std::fs::write(&path, content).unwrap();
    path
}

const SPOTIFY_VARS: [(&str, &str); 3] = [
    ("SPOTIFY_CLIENT_ID", "id"),
    ("SPOTIFY_CLIENT_SECRET", "sec"),
    ("SPOTIFY_REDIRECT_URI", "http://127.0.0.1:8888/callback"),
];

#[tokio::test]
async fn test_app_config_from_csv() {
    let mut vars = SPOTIFY_VARS.to_vec();
    vars.push(("SPOTIFY_PLAYLIST_ID", "spotify:playlist:abc123"));
    vars.push(("CSV_PATH", "tracks.csv"));
    vars.push(("GOOGLE_SHEET_ID", "ignored"));

    let config = AppConfig::from_lookup(lookup(&vars)).await.unwrap();

    assert_eq!(config.playlist_id, "abc123");
    assert_eq!(config.source, MappingSource::Csv(PathBuf::from("tracks.csv")));
    assert_eq!(config.api_url, DEFAULT_SPOTIFY_API_URL);
    assert_eq!(config.display_address.to_string(), "0.0.0.0:5000");
    assert_eq!(config.columns.name, "name");
    assert_eq!(config.columns.link, "spotify_link");
    assert_eq!(config.oauth.credentials.client_id, "id");
    assert_eq!(config.oauth.credentials.client_secret.as_deref(), Some("sec"));
    assert_eq!(config.oauth.scope, DEFAULT_SPOTIFY_SCOPE);
    assert_eq!(config.oauth.callback_address.to_string(), "127.0.0.1:8888");
    assert!(config.contributor_images.is_none());
}

#[tokio::test]
async fn test_missing_playlist_is_fatal() {
    let mut vars = SPOTIFY_VARS.to_vec();
    vars.push(("CSV_PATH", "tracks.csv"));

    let err = AppConfig::from_lookup(lookup(&vars)).await.unwrap_err();

    assert!(matches!(err, ConfigError::Missing(_)));
    assert!(err.to_string().contains("SPOTIFY_PLAYLIST_ID"));
}

#[tokio::test]
async fn test_blank_values_count_as_missing() {
    let mut vars = SPOTIFY_VARS.to_vec();
    vars.push(("SPOTIFY_PLAYLIST_ID", "   "));
    vars.push(("CSV_PATH", "tracks.csv"));

    assert!(AppConfig::from_lookup(lookup(&vars)).await.is_err());
}

#[tokio::test]
async fn test_invalid_display_address() {
    let mut vars = SPOTIFY_VARS.to_vec();
    vars.push(("SPOTIFY_PLAYLIST_ID", "abc"));
    vars.push(("CSV_PATH", "tracks.csv"));
    vars.push(("DISPLAY_ADDRESS", "not-an-address"));

    let err = AppConfig::from_lookup(lookup(&vars)).await.unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { ref name, .. } if name == "DISPLAY_ADDRESS"));
}

#[test]
fn test_mapping_source_requires_sheet_or_csv() {
    let err = MappingSource::from_lookup(lookup(&[])).unwrap_err();
    assert!(err.to_string().contains("GOOGLE_SHEET_ID or CSV_PATH"));
}

#[test]
fn test_sheet_requires_credentials() {
    let err = MappingSource::from_lookup(lookup(&[("GOOGLE_SHEET_ID", "sheet")])).unwrap_err();
    assert!(err.to_string().contains("GOOGLE_SERVICE_JSON or GOOGLE_API_KEY"));
}

#[test]
fn test_sheet_prefers_service_account() {
    let source = MappingSource::from_lookup(lookup(&[
        ("GOOGLE_SHEET_ID", "sheet"),
        ("GOOGLE_SHEET_TAB", "Form Responses 1"),
        ("GOOGLE_SERVICE_JSON", "/keys/sa.json"),
        ("GOOGLE_API_KEY", "key"),
    ]))
    .unwrap();

    assert_eq!(
        source,
        MappingSource::GoogleSheet {
            sheet_id: "sheet".to_string(),
            tab: Some("Form Responses 1".to_string()),
            auth: SheetAuth::ServiceAccount(PathBuf::from("/keys/sa.json")),
        }
    );
}

#[test]
fn test_sheet_with_api_key() {
    let source = MappingSource::from_lookup(lookup(&[
        ("GOOGLE_SHEET_ID", "sheet"),
        ("GOOGLE_API_KEY", "key"),
    ]))
    .unwrap();

    assert_eq!(
        source,
        MappingSource::GoogleSheet {
            sheet_id: "sheet".to_string(),
            tab: None,
            auth: SheetAuth::ApiKey("key".to_string()),
        }
    );
}

#[test]
fn test_custom_columns() {
    let columns = columns_from_lookup(lookup(&[("NAME_COLUMN", "Who"), ("LINK_COLUMN", "")]));
    assert_eq!(columns.name, "Who");
    assert_eq!(columns.link, "spotify_link");
}

#[tokio::test]
async fn test_load_spotify_creds() {
    let path = temp_file(
        "creds.json",
        r#"{"client_id":"id","client_secret":"sec","redirect_uri":"uri"}"#,
    );

    let creds = load_spotify_creds(path.to_str().unwrap()).await;
    std::fs::remove_file(&path).ok();
    let creds = creds.unwrap();

    assert_eq!(creds.client_id, "id");
    assert_eq!(creds.client_secret.as_deref(), Some("sec"));
    assert_eq!(creds.redirect_uri, "uri");
}

#[tokio::test]
async fn test_load_spotify_creds_missing_key() {
    let path = temp_file("creds-partial.json", r#"{"client_id":"id"}"#);

    let err = load_spotify_creds(path.to_str().unwrap()).await;
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, Err(ConfigError::File { .. })));
}

#[tokio::test]
async fn test_oauth_falls_back_to_credentials_file() {
    let path = temp_file(
        "fallback-creds.json",
        r#"{"client_id":"file-id","client_secret":"file-sec","redirect_uri":"http://localhost:8888/callback"}"#,
    );
    let path_str = path.to_str().unwrap().to_string();

    let oauth = OAuthSettings::from_lookup(lookup(&[
        ("SPOTIFY_CLIENT_ID", "env-id"),
        ("SPOTIFY_CREDS_JSON", path_str.as_str()),
    ]))
    .await;
    std::fs::remove_file(&path).ok();
    let oauth = oauth.unwrap();

    assert_eq!(oauth.credentials.client_id, "file-id");
    assert_eq!(oauth.credentials.redirect_uri, "http://localhost:8888/callback");
}

#[tokio::test]
async fn test_oauth_without_any_credentials_is_fatal() {
    let err = OAuthSettings::from_lookup(lookup(&[(
        "SPOTIFY_CREDS_JSON",
        "/definitely/not/here/creds.json",
    )]))
    .await
    .unwrap_err();

    assert!(matches!(err, ConfigError::Missing(_)));
}

#[tokio::test]
async fn test_load_contributor_images() {
    let path = temp_file(
        "images.json",
        r#"{"Alice": "/imgs/a.png", "Bob": "https://example.com/b.jpg"}"#,
    );

    let images = load_contributor_images(&path).await;
    std::fs::remove_file(&path).ok();
    let images = images.unwrap();

    assert_eq!(images.len(), 2);
    assert_eq!(images["Alice"], "/imgs/a.png");
}
