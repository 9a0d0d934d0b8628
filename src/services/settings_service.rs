use crate::models::Settings;
use crate::services::endpoints::{path, Operation, Resource};
use crate::services::{ApiClient, ApiError, CancelToken};

pub async fn get_settings(client: &ApiClient, cancel: &CancelToken) -> Result<Settings, ApiError> {
    client.get(&path(Resource::Settings, Operation::Get, &[]), cancel).await
}

pub async fn update_settings(
    client: &ApiClient,
    settings: &Settings,
    cancel: &CancelToken,
) -> Result<Settings, ApiError> {
    client
        .put(&path(Resource::Settings, Operation::Update, &[]), settings, cancel)
        .await
}
