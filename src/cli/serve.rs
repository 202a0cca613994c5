use std::{collections::HashMap, sync::Arc};

use crate::{
    cli::{connect, load_contributors, sync_playlist},
    config::{self, AppConfig},
    context::AppContext,
    error, server,
};

/// Syncs the playlist once and then serves the now playing page.
pub async fn serve(config: &AppConfig) {
    let mapping = load_contributors(&config.source, &config.columns).await;

    let contributor_images = match &config.contributor_images {
        Some(path) => match config::load_contributor_images(path).await {
            Ok(images) => images,
            Err(e) => error!("{}", e),
        },
        None => HashMap::new(),
    };

    let client = Arc::new(connect(config).await);
    sync_playlist(client.as_ref(), &config.playlist_id, mapping.order()).await;

    let ctx = AppContext::new(mapping, client, contributor_images);
    if let Err(e) = server::start_display_server(Arc::new(ctx), config.display_address).await {
        error!("{}", e);
    }
}
