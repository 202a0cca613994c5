use crate::{display::NowPlaying, utils::escape_html};

/// Seconds between client side page reloads.
pub const REFRESH_SECONDS: u32 = 10;

const STYLE: &str = r#"    html { font-family: system-ui, sans-serif; background:#111; color:#fefefe; text-align:center; }
    img.cover { width:45vw; margin-top:4vh; box-shadow:0 0 15px #000; }
    img.contrib { width:10vw; height:10vw; border-radius:50%; object-fit:cover; margin-top:2vh; }
    .track { font-size:4vw; margin:2vh 0; }
    .artist { font-size:3vw; opacity:0.8; }
    .contrib { font-size:2.5vw; margin-top:4vh; color:#0fa9e6; }
    .error { font-size:2vw; color:#e65c0f; }"#;

/// Renders the now playing page; `None` renders the idle placeholder.
pub fn render_page(now_playing: Option<&NowPlaying>) -> String {
    let body = match now_playing {
        Some(now) => render_track(now),
        None => "  <p>Nothing playing right now …</p>\n".to_string(),
    };
    layout(&body)
}

/// Page shown when the playback lookup failed. Still refreshes, so the
/// display recovers on its own.
pub fn render_error(message: &str) -> String {
    layout(&format!(
        "  <p>Playback status unavailable.</p>\n  <p class=\"error\">{}</p>\n",
        escape_html(message)
    ))
}

fn render_track(now: &NowPlaying) -> String {
    let mut body = String::new();

    if let Some(cover) = &now.cover_url {
        body.push_str(&format!(
            "  <img class=\"cover\" src=\"{}\" alt=\"cover\" />\n",
            escape_html(cover)
        ));
    }
    body.push_str(&format!(
        "  <div class=\"track\">{}</div>\n",
        escape_html(&now.track_name)
    ));
    body.push_str(&format!(
        "  <div class=\"artist\">{}</div>\n",
        escape_html(&now.artists)
    ));

    body.push_str("  <div class=\"contrib\">\n");
    if let Some(image) = &now.contributor_image {
        body.push_str(&format!(
            "    <img class=\"contrib\" src=\"{}\" alt=\"{}\" />\n",
            escape_html(image),
            escape_html(&now.contributor)
        ));
    }
    body.push_str(&format!(
        "    added by {}\n  </div>\n",
        escape_html(&now.contributor)
    ));

    body
}

fn layout(body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head>\n  <meta charset=\"utf-8\" />\n  \
         <meta http-equiv=\"refresh\" content=\"{refresh}\">\n  <title>Now Playing</title>\n  \
         <style>\n{style}\n  </style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        refresh = REFRESH_SECONDS,
        style = STYLE,
        body = body,
    )
}
