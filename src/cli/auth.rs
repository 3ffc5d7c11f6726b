use crate::{
    config::{Settings, YOUTUBE_CREDENTIALS},
    youtube,
};

pub async fn auth(settings: &Settings) {
    youtube::auth::auth(
        settings.youtube.clone(),
        settings.credentials_path(YOUTUBE_CREDENTIALS),
    )
    .await;
}
