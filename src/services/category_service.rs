use crate::models::{Category, CategoryInput};
use crate::services::endpoints::{path, Operation, Resource};
use crate::services::{ApiClient, ApiError, CancelToken};

pub async fn list_categories(client: &ApiClient, cancel: &CancelToken) -> Result<Vec<Category>, ApiError> {
    client.get(&path(Resource::Category, Operation::List, &[]), cancel).await
}

pub async fn create_category(
    client: &ApiClient,
    input: &CategoryInput,
    cancel: &CancelToken,
) -> Result<Category, ApiError> {
    client.post(&path(Resource::Category, Operation::Create, &[]), input, cancel).await
}

pub async fn update_category(
    client: &ApiClient,
    id: &str,
    input: &CategoryInput,
    cancel: &CancelToken,
) -> Result<Category, ApiError> {
    client
        .put(&path(Resource::Category, Operation::Update, &[("id", id)]), input, cancel)
        .await
}

pub async fn delete_category(client: &ApiClient, id: &str, cancel: &CancelToken) -> Result<(), ApiError> {
    client
        .delete(&path(Resource::Category, Operation::Delete, &[("id", id)]), cancel)
        .await
}
