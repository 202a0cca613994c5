use crate::{config::OAuthSettings, error, spotify};

pub async fn auth(oauth: &OAuthSettings) {
    if let Err(e) = spotify::auth::auth(oauth).await {
        error!("{}", e);
    }
}
