use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    context::AppContext,
    display::{NowPlaying, render_error, render_page},
    errors::SpotifyError,
    warning,
};

/// Playback lookup failure, rendered as a 502 page.
#[derive(Debug)]
pub struct PlaybackUnavailable(pub SpotifyError);

impl IntoResponse for PlaybackUnavailable {
    fn into_response(self) -> Response {
        (StatusCode::BAD_GATEWAY, Html(render_error(&self.0.to_string()))).into_response()
    }
}

/// `GET /`: the now playing page.
pub async fn now_playing(
    State(ctx): State<Arc<AppContext>>,
) -> Result<Html<String>, PlaybackUnavailable> {
    let playback = ctx.playback.current_playback().await.map_err(|e| {
        warning!("Playback lookup failed: {}", e);
        PlaybackUnavailable(e)
    })?;

    let now = NowPlaying::from_playback(
        playback.as_ref(),
        &ctx.mapping,
        &ctx.contributor_images,
    );

    Ok(Html(render_page(now.as_ref())))
}
