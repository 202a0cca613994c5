use crowdlist::{
    errors::SheetError,
    sheet::{normalize_uri, parse_playlist_id},
};

#[test]
fn test_normalize_web_link_drops_query() {
    let uri = normalize_uri("https://open.spotify.com/track/123?si=abc").unwrap();
    assert_eq!(uri.as_str(), "spotify:track:123");
    assert_eq!(uri.id(), "123");
}

#[test]
fn test_normalize_trims_whitespace() {
    let uri = normalize_uri("  https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC \n").unwrap();
    assert_eq!(uri.as_str(), "spotify:track:4uLU6hMCjMI75M1A2tKUQC");
}

#[test]
fn test_normalize_web_link_with_locale_and_trailing_path() {
    let uri = normalize_uri("https://open.spotify.com/intl-de/track/abc123/").unwrap();
    assert_eq!(uri.as_str(), "spotify:track:abc123");
}

#[test]
fn test_normalize_canonical_passes_through() {
    let uri = normalize_uri("spotify:track:456").unwrap();
    assert_eq!(uri.as_str(), "spotify:track:456");
}

#[test]
fn test_normalize_canonical_with_query() {
    let uri = normalize_uri("spotify:track:456?context=x").unwrap();
    assert_eq!(uri.as_str(), "spotify:track:456");
}

#[test]
fn test_normalize_is_idempotent() {
    let inputs = [
        "https://open.spotify.com/track/123?si=abc",
        "spotify:track:456",
        " spotify:track:789 ",
    ];

    for input in inputs {
        let once = normalize_uri(input).unwrap();
        let twice = normalize_uri(once.as_str()).unwrap();
        assert_eq!(once, twice, "not idempotent for {input}");
    }
}

#[test]
fn test_url_and_uri_forms_are_equal() {
    let from_url = normalize_uri("https://open.spotify.com/track/123?si=abc").unwrap();
    let from_uri = normalize_uri("spotify:track:123").unwrap();
    assert_eq!(from_url, from_uri);
}

#[test]
fn test_web_link_without_track_marker_fails() {
    let err = normalize_uri("https://open.spotify.com/album/123").unwrap_err();
    assert!(matches!(err, SheetError::Validation(_)));
}

#[test]
fn test_web_link_with_empty_id_fails() {
    let err = normalize_uri("https://open.spotify.com/track/?si=abc").unwrap_err();
    assert!(matches!(err, SheetError::Validation(_)));
}

#[test]
fn test_web_link_with_invalid_id_fails() {
    let err = normalize_uri("https://open.spotify.com/track/abc-def").unwrap_err();
    assert!(matches!(err, SheetError::Validation(_)));
    assert!(normalize_uri("https://open.spotify.com/track/abc%20def").is_err());
}

#[test]
fn test_web_link_drops_fragment() {
    let uri = normalize_uri("https://open.spotify.com/track/123#x").unwrap();
    assert_eq!(uri.as_str(), "spotify:track:123");

    let again = normalize_uri(uri.as_str()).unwrap();
    assert_eq!(again, uri);
}

#[test]
fn test_unrecognized_value_fails() {
    assert!(normalize_uri("not a link").is_err());
    assert!(normalize_uri("spotify:album:123").is_err());
    assert!(normalize_uri("spotify:track:").is_err());
}

#[test]
fn test_parse_playlist_id_variants() {
    assert_eq!(parse_playlist_id("37i9dQZF1DX").unwrap(), "37i9dQZF1DX");
    assert_eq!(
        parse_playlist_id("spotify:playlist:37i9dQZF1DX").unwrap(),
        "37i9dQZF1DX"
    );
    assert_eq!(
        parse_playlist_id("https://open.spotify.com/playlist/37i9dQZF1DX?si=1").unwrap(),
        "37i9dQZF1DX"
    );
}

#[test]
fn test_parse_playlist_id_rejects_garbage() {
    assert!(parse_playlist_id("https://open.spotify.com/track/123").is_err());
    assert!(parse_playlist_id("").is_err());
    assert!(parse_playlist_id("spotify:playlist:").is_err());
}
