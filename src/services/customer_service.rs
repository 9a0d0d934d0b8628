use crate::models::Customer;
use crate::services::endpoints::{path, Operation, Resource};
use crate::services::{ApiClient, ApiError, CancelToken};

pub async fn list_customers(client: &ApiClient, cancel: &CancelToken) -> Result<Vec<Customer>, ApiError> {
    client.get(&path(Resource::Customer, Operation::List, &[]), cancel).await
}

pub async fn get_customer(client: &ApiClient, id: &str, cancel: &CancelToken) -> Result<Customer, ApiError> {
    client.get(&path(Resource::Customer, Operation::Get, &[("id", id)]), cancel).await
}

pub async fn delete_customer(client: &ApiClient, id: &str, cancel: &CancelToken) -> Result<(), ApiError> {
    client
        .delete(&path(Resource::Customer, Operation::Delete, &[("id", id)]), cancel)
        .await
}
