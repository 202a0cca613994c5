//! # Display Module
//!
//! The now playing page: [`NowPlaying`] turns Spotify's playback state plus
//! the contributor mapping into what is shown, [`render_page`] turns that into
//! HTML. The page reloads itself every [`REFRESH_SECONDS`]; there is no push
//! channel.

mod now_playing;
mod page;

pub use now_playing::{NowPlaying, UNKNOWN_CONTRIBUTOR};
pub use page::{REFRESH_SECONDS, render_error, render_page};
