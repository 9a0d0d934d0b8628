use crate::models::{CategoryInput, Subcategory};
use crate::services::endpoints::{path, Operation, Resource};
use crate::services::{ApiClient, ApiError, CancelToken};

pub async fn list_subcategories(client: &ApiClient, cancel: &CancelToken) -> Result<Vec<Subcategory>, ApiError> {
    client.get(&path(Resource::Subcategory, Operation::List, &[]), cancel).await
}

pub async fn create_subcategory(
    client: &ApiClient,
    input: &CategoryInput,
    cancel: &CancelToken,
) -> Result<Subcategory, ApiError> {
    client.post(&path(Resource::Subcategory, Operation::Create, &[]), input, cancel).await
}

pub async fn update_subcategory(
    client: &ApiClient,
    id: &str,
    input: &CategoryInput,
    cancel: &CancelToken,
) -> Result<Subcategory, ApiError> {
    client
        .put(&path(Resource::Subcategory, Operation::Update, &[("id", id)]), input, cancel)
        .await
}

pub async fn delete_subcategory(client: &ApiClient, id: &str, cancel: &CancelToken) -> Result<(), ApiError> {
    client
        .delete(&path(Resource::Subcategory, Operation::Delete, &[("id", id)]), cancel)
        .await
}
