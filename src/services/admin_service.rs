// Autenticación y cuentas de administrador

use crate::models::{AdminAccount, AdminInput, LoginRequest, LoginResponse, UserSummary};
use crate::services::endpoints::{path, Operation, Resource};
use crate::services::{ApiClient, ApiError, CancelToken};

pub async fn login(
    client: &ApiClient,
    request: &LoginRequest,
    cancel: &CancelToken,
) -> Result<UserSummary, ApiError> {
    log::info!("🔐 Iniciando sesión: {}", request.email);
    let response: LoginResponse = client
        .post(&path(Resource::Admin, Operation::Login, &[]), request, cancel)
        .await?;
    log::info!("✅ Sesión iniciada: {} ({:?})", response.user.email, response.user.role);
    Ok(response.user)
}

pub async fn logout(client: &ApiClient, cancel: &CancelToken) -> Result<(), ApiError> {
    client
        .post_empty(&path(Resource::Admin, Operation::Logout, &[]), cancel)
        .await
}

/// Usuario asociado a la cookie de sesión actual
pub async fn current_user(client: &ApiClient, cancel: &CancelToken) -> Result<UserSummary, ApiError> {
    client.get(&path(Resource::Admin, Operation::Me, &[]), cancel).await
}

pub async fn list_admins(client: &ApiClient, cancel: &CancelToken) -> Result<Vec<AdminAccount>, ApiError> {
    client.get(&path(Resource::Admin, Operation::List, &[]), cancel).await
}

pub async fn get_admin(client: &ApiClient, id: &str, cancel: &CancelToken) -> Result<AdminAccount, ApiError> {
    client.get(&path(Resource::Admin, Operation::Get, &[("id", id)]), cancel).await
}

pub async fn create_admin(
    client: &ApiClient,
    input: &AdminInput,
    cancel: &CancelToken,
) -> Result<AdminAccount, ApiError> {
    client.post(&path(Resource::Admin, Operation::Create, &[]), input, cancel).await
}

pub async fn update_admin(
    client: &ApiClient,
    id: &str,
    input: &AdminInput,
    cancel: &CancelToken,
) -> Result<AdminAccount, ApiError> {
    client
        .put(&path(Resource::Admin, Operation::Update, &[("id", id)]), input, cancel)
        .await
}

pub async fn delete_admin(client: &ApiClient, id: &str, cancel: &CancelToken) -> Result<(), ApiError> {
    client
        .delete(&path(Resource::Admin, Operation::Delete, &[("id", id)]), cancel)
        .await
}
