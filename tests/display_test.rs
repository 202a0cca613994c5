use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use crowdlist::{
    api,
    context::AppContext,
    display::{NowPlaying, REFRESH_SECONDS, UNKNOWN_CONTRIBUTOR, render_page},
    errors::SpotifyError,
    sheet::{Columns, parse_rows},
    spotify::PlaybackSource,
    types::{
        ContributorMap, CurrentPlayback, Image, PlaybackAlbum, PlaybackArtist, PlaybackItem,
    },
};

struct FixedPlayback(Option<CurrentPlayback>);

#[async_trait]
impl PlaybackSource for FixedPlayback {
    async fn current_playback(&self) -> Result<Option<CurrentPlayback>, SpotifyError> {
        Ok(self.0.clone())
    }
}

struct BrokenPlayback;

#[async_trait]
impl PlaybackSource for BrokenPlayback {
    async fn current_playback(&self) -> Result<Option<CurrentPlayback>, SpotifyError> {
        Err(SpotifyError::Auth("token expired".to_string()))
    }
}

fn mapping() -> ContributorMap {
    let rows = vec![
        vec!["name".to_string(), "spotify_link".to_string()],
        vec!["Alice".to_string(), "spotify:track:111".to_string()],
    ];
    parse_rows(&rows, &Columns::default()).unwrap()
}

fn playing(uri: &str, images: Vec<&str>) -> CurrentPlayback {
    CurrentPlayback {
        is_playing: true,
        item: Some(PlaybackItem {
            uri: uri.to_string(),
            name: "Song".to_string(),
            artists: vec![
                PlaybackArtist {
                    name: "Art".to_string(),
                },
                PlaybackArtist {
                    name: "Garfunkel".to_string(),
                },
            ],
            album: Some(PlaybackAlbum {
                images: images
                    .into_iter()
                    .map(|url| Image {
                        url: url.to_string(),
                    })
                    .collect(),
            }),
        }),
    }
}

fn avatars() -> HashMap<String, String> {
    HashMap::from([("Alice".to_string(), "/imgs/a.png".to_string())])
}

#[test]
fn test_now_playing_from_known_track() {
    let playback = playing("spotify:track:111", vec!["http://cover", "http://small"]);

    let now = NowPlaying::from_playback(Some(&playback), &mapping(), &avatars()).unwrap();

    assert_eq!(
        now,
        NowPlaying {
            track_name: "Song".to_string(),
            artists: "Art, Garfunkel".to_string(),
            contributor: "Alice".to_string(),
            cover_url: Some("http://cover".to_string()),
            contributor_image: Some("/imgs/a.png".to_string()),
        }
    );
}

#[test]
fn test_unknown_track_is_credited_to_someone() {
    let playback = playing("spotify:track:999", vec![]);

    let now = NowPlaying::from_playback(Some(&playback), &mapping(), &avatars()).unwrap();

    assert_eq!(now.contributor, UNKNOWN_CONTRIBUTOR);
    assert_eq!(now.cover_url, None);
    assert_eq!(now.contributor_image, None);
}

#[test]
fn test_nothing_playing_gives_placeholder() {
    let mut paused = playing("spotify:track:111", vec![]);
    paused.is_playing = false;
    let no_item = CurrentPlayback {
        is_playing: true,
        item: None,
    };

    assert_eq!(NowPlaying::from_playback(None, &mapping(), &avatars()), None);
    assert_eq!(NowPlaying::from_playback(Some(&paused), &mapping(), &avatars()), None);
    assert_eq!(NowPlaying::from_playback(Some(&no_item), &mapping(), &avatars()), None);
}

#[test]
fn test_render_page_shows_track_and_images() {
    let playback = playing("spotify:track:111", vec!["http://cover"]);
    let now = NowPlaying::from_playback(Some(&playback), &mapping(), &avatars());

    let html = render_page(now.as_ref());

    assert!(html.contains("http://cover"));
    assert!(html.contains("/imgs/a.png"));
    assert!(html.contains("<div class=\"track\">Song</div>"));
    assert!(html.contains("Art, Garfunkel"));
    assert!(html.contains("added by Alice"));
    assert!(html.contains(&format!(
        "<meta http-equiv=\"refresh\" content=\"{}\">",
        REFRESH_SECONDS
    )));
}

#[test]
fn test_render_placeholder_page() {
    let html = render_page(None);

    assert!(html.contains("Nothing playing right now"));
    assert!(!html.contains("added by"));
    assert!(html.contains("http-equiv=\"refresh\""));
}

#[test]
fn test_render_page_escapes_values() {
    let now = NowPlaying {
        track_name: "<b>Loud</b>".to_string(),
        artists: "Tom & Jerry".to_string(),
        contributor: "\"Eve\"".to_string(),
        cover_url: None,
        contributor_image: None,
    };

    let html = render_page(Some(&now));

    assert!(html.contains("&lt;b&gt;Loud&lt;/b&gt;"));
    assert!(html.contains("Tom &amp; Jerry"));
    assert!(html.contains("added by &quot;Eve&quot;"));
    assert!(!html.contains("<b>Loud</b>"));
}

#[test]
fn test_current_playback_parses_api_payload() {
    let playback: CurrentPlayback = serde_json::from_str(
        r#"{
            "is_playing": true,
            "progress_ms": 1000,
            "item": {
                "uri": "spotify:track:111",
                "name": "Song",
                "artists": [{"name": "Art", "id": "x"}],
                "album": {"name": "Album", "images": [{"url": "http://cover", "height": 640, "width": 640}]}
            }
        }"#,
    )
    .unwrap();

    let now = NowPlaying::from_playback(Some(&playback), &mapping(), &HashMap::new()).unwrap();
    assert_eq!(now.contributor, "Alice");
    assert_eq!(now.cover_url.as_deref(), Some("http://cover"));
}

#[tokio::test]
async fn test_handler_renders_current_track() {
    let ctx = AppContext::new(
        mapping(),
        Arc::new(FixedPlayback(Some(playing(
            "spotify:track:111",
            vec!["http://cover"],
        )))),
        avatars(),
    );

    let page = api::now_playing(State(Arc::new(ctx))).await.unwrap();

    assert!(page.0.contains("http://cover"));
    assert!(page.0.contains("/imgs/a.png"));
}

#[tokio::test]
async fn test_handler_renders_placeholder_without_device() {
    let ctx = AppContext::new(mapping(), Arc::new(FixedPlayback(None)), HashMap::new());

    let page = api::now_playing(State(Arc::new(ctx))).await.unwrap();

    assert!(page.0.contains("Nothing playing right now"));
}

#[tokio::test]
async fn test_handler_surfaces_playback_errors() {
    let ctx = AppContext::new(mapping(), Arc::new(BrokenPlayback), HashMap::new());

    let err = api::now_playing(State(Arc::new(ctx))).await.unwrap_err();
    assert!(err.0.to_string().contains("token expired"));

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_health_reports_ok() {
    let body = api::health().await.0;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "crowdlist");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
