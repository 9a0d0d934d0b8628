use crate::models::{Shop, ShopInput};
use crate::services::endpoints::{path, Operation, Resource};
use crate::services::{ApiClient, ApiError, CancelToken};

pub async fn list_shops(client: &ApiClient, cancel: &CancelToken) -> Result<Vec<Shop>, ApiError> {
    client.get(&path(Resource::Shop, Operation::List, &[]), cancel).await
}

pub async fn get_shop(client: &ApiClient, id: &str, cancel: &CancelToken) -> Result<Shop, ApiError> {
    client.get(&path(Resource::Shop, Operation::Get, &[("id", id)]), cancel).await
}

pub async fn create_shop(client: &ApiClient, input: &ShopInput, cancel: &CancelToken) -> Result<Shop, ApiError> {
    client.post(&path(Resource::Shop, Operation::Create, &[]), input, cancel).await
}

pub async fn update_shop(
    client: &ApiClient,
    id: &str,
    input: &ShopInput,
    cancel: &CancelToken,
) -> Result<Shop, ApiError> {
    client
        .put(&path(Resource::Shop, Operation::Update, &[("id", id)]), input, cancel)
        .await
}

pub async fn delete_shop(client: &ApiClient, id: &str, cancel: &CancelToken) -> Result<(), ApiError> {
    client
        .delete(&path(Resource::Shop, Operation::Delete, &[("id", id)]), cancel)
        .await
}
