// Pagos: solo lectura desde la consola

use crate::models::Payment;
use crate::services::endpoints::{path, Operation, Resource};
use crate::services::{ApiClient, ApiError, CancelToken};

pub async fn list_payments(client: &ApiClient, cancel: &CancelToken) -> Result<Vec<Payment>, ApiError> {
    client.get(&path(Resource::Payment, Operation::List, &[]), cancel).await
}

pub async fn get_payment(client: &ApiClient, id: &str, cancel: &CancelToken) -> Result<Payment, ApiError> {
    client.get(&path(Resource::Payment, Operation::Get, &[("id", id)]), cancel).await
}
