use crate::{errors::SheetError, types::TrackUri};

const WEB_DOMAIN: &str = "open.spotify.com";
const TRACK_MARKER: &str = "/track/";
const PLAYLIST_MARKER: &str = "/playlist/";
const PLAYLIST_PREFIX: &str = "spotify:playlist:";

/// Normalizes a spreadsheet cell into a canonical `spotify:track:<id>` URI.
///
/// Accepts `https://open.spotify.com/track/<id>` links (query string,
/// fragment and locale prefixes like `/intl-de/` are ignored) and canonical
/// URIs, which pass through unchanged. Ids must be ASCII alphanumeric either
/// way, so the result normalizes to itself.
///
/// # Errors
///
/// Returns [`SheetError::Validation`] when a web link has no usable track
/// segment or when the cell is neither a track link nor a track URI.
///
/// # Example
///
/// ```
/// let uri = normalize_uri("https://open.spotify.com/track/123?si=abc")?;
/// assert_eq!(uri.as_str(), "spotify:track:123");
/// ```
pub fn normalize_uri(raw: &str) -> Result<TrackUri, SheetError> {
    let uri = strip_query(raw);

    if uri.contains(WEB_DOMAIN) {
        return match path_segment_after(uri, TRACK_MARKER) {
            Some(id) if is_valid_id(id) => Ok(TrackUri::from_id(id)),
            _ => Err(SheetError::Validation(raw.trim().to_string())),
        };
    }

    match uri.strip_prefix(TrackUri::PREFIX) {
        Some(id) if is_valid_id(id) => Ok(TrackUri::from_canonical(uri)),
        _ => Err(SheetError::Validation(raw.trim().to_string())),
    }
}

/// Extracts the bare playlist id from an id, a `spotify:playlist:` URI or an
/// `open.spotify.com/playlist/` link.
pub fn parse_playlist_id(raw: &str) -> Result<String, SheetError> {
    let value = strip_query(raw);

    let id = if value.contains(WEB_DOMAIN) {
        path_segment_after(value, PLAYLIST_MARKER)
    } else if let Some(id) = value.strip_prefix(PLAYLIST_PREFIX) {
        Some(id)
    } else {
        Some(value)
    };

    match id {
        Some(id) if is_valid_id(id) => Ok(id.to_string()),
        _ => Err(SheetError::Validation(raw.trim().to_string())),
    }
}

fn strip_query(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.split_once(['?', '#']) {
        Some((head, _)) => head,
        None => trimmed,
    }
}

fn path_segment_after<'a>(value: &'a str, marker: &str) -> Option<&'a str> {
    let (_, rest) = value.split_once(marker)?;
    let segment = rest.split('/').next().unwrap_or_default();
    if segment.is_empty() { None } else { Some(segment) }
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric())
}
