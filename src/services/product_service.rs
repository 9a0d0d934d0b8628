// Productos y sus variantes

use crate::models::{Product, ProductInput, Variant, VariantInput};
use crate::services::endpoints::{path, Operation, Resource};
use crate::services::{ApiClient, ApiError, CancelToken};

pub async fn list_products(client: &ApiClient, cancel: &CancelToken) -> Result<Vec<Product>, ApiError> {
    client.get(&path(Resource::Product, Operation::List, &[]), cancel).await
}

pub async fn get_product(client: &ApiClient, id: &str, cancel: &CancelToken) -> Result<Product, ApiError> {
    client.get(&path(Resource::Product, Operation::Get, &[("id", id)]), cancel).await
}

pub async fn create_product(
    client: &ApiClient,
    input: &ProductInput,
    cancel: &CancelToken,
) -> Result<Product, ApiError> {
    client.post(&path(Resource::Product, Operation::Create, &[]), input, cancel).await
}

pub async fn update_product(
    client: &ApiClient,
    id: &str,
    input: &ProductInput,
    cancel: &CancelToken,
) -> Result<Product, ApiError> {
    client
        .put(&path(Resource::Product, Operation::Update, &[("id", id)]), input, cancel)
        .await
}

pub async fn delete_product(client: &ApiClient, id: &str, cancel: &CancelToken) -> Result<(), ApiError> {
    client
        .delete(&path(Resource::Product, Operation::Delete, &[("id", id)]), cancel)
        .await
}

pub async fn list_variants(
    client: &ApiClient,
    product_id: &str,
    cancel: &CancelToken,
) -> Result<Vec<Variant>, ApiError> {
    client
        .get(&path(Resource::Variant, Operation::List, &[("productId", product_id)]), cancel)
        .await
}

pub async fn create_variant(
    client: &ApiClient,
    product_id: &str,
    input: &VariantInput,
    cancel: &CancelToken,
) -> Result<Variant, ApiError> {
    client
        .post(&path(Resource::Variant, Operation::Create, &[("productId", product_id)]), input, cancel)
        .await
}

pub async fn update_variant(
    client: &ApiClient,
    id: &str,
    input: &VariantInput,
    cancel: &CancelToken,
) -> Result<Variant, ApiError> {
    client
        .put(&path(Resource::Variant, Operation::Update, &[("id", id)]), input, cancel)
        .await
}

pub async fn delete_variant(client: &ApiClient, id: &str, cancel: &CancelToken) -> Result<(), ApiError> {
    client
        .delete(&path(Resource::Variant, Operation::Delete, &[("id", id)]), cancel)
        .await
}
