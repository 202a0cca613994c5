use std::{collections::HashMap, sync::Arc};

use crate::{spotify::PlaybackSource, types::ContributorMap};

/// State shared by all display requests.
///
/// Built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppContext {
    pub mapping: Arc<ContributorMap>,
    pub playback: Arc<dyn PlaybackSource>,
    /// Contributor name to avatar image URL.
    pub contributor_images: Arc<HashMap<String, String>>,
}

impl AppContext {
    pub fn new(
        mapping: ContributorMap,
        playback: Arc<dyn PlaybackSource>,
        contributor_images: HashMap<String, String>,
    ) -> Self {
        AppContext {
            mapping: Arc::new(mapping),
            playback,
            contributor_images: Arc::new(contributor_images),
        }
    }
}
