use crate::models::{Order, OrderStatus, OrderStatusUpdate};
use crate::services::endpoints::{path, Operation, Resource};
use crate::services::{ApiClient, ApiError, CancelToken};

pub async fn list_orders(client: &ApiClient, cancel: &CancelToken) -> Result<Vec<Order>, ApiError> {
    client.get(&path(Resource::Order, Operation::List, &[]), cancel).await
}

pub async fn get_order(client: &ApiClient, id: &str, cancel: &CancelToken) -> Result<Order, ApiError> {
    client.get(&path(Resource::Order, Operation::Get, &[("id", id)]), cancel).await
}

pub async fn update_order_status(
    client: &ApiClient,
    id: &str,
    status: OrderStatus,
    cancel: &CancelToken,
) -> Result<Order, ApiError> {
    log::info!("📦 Pedido {} → {}", id, status.label());
    client
        .patch(
            &path(Resource::Order, Operation::UpdateStatus, &[("id", id)]),
            &OrderStatusUpdate { status },
            cancel,
        )
        .await
}

pub async fn delete_order(client: &ApiClient, id: &str, cancel: &CancelToken) -> Result<(), ApiError> {
    client
        .delete(&path(Resource::Order, Operation::Delete, &[("id", id)]), cancel)
        .await
}
