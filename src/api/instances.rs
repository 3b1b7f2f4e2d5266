//! Book instance (copy) API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book_instance::{BookInstance, BookInstanceIn},
};

use super::AuthenticatedUser;

/// List all copies
#[utoipa::path(
    get,
    path = "/instances/",
    tag = "instances",
    responses(
        (status = 200, description = "Book instance list", body = Vec<BookInstance>)
    )
)]
pub async fn list_instances(State(state): State<crate::AppState>) -> AppResult<Json<Vec<BookInstance>>> {
    let instances = state.services.instances.list().await?;
    Ok(Json(instances))
}

/// Get copy by ID
#[utoipa::path(
    get,
    path = "/instances/{id}/",
    tag = "instances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "Book instance details", body = BookInstance),
        (status = 404, description = "Book instance not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_instance(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookInstance>> {
    let instance = state.services.instances.get_by_id(id).await?;
    Ok(Json(instance))
}

/// Create copy (the id is generated)
#[utoipa::path(
    post,
    path = "/instances/",
    tag = "instances",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    request_body = BookInstanceIn,
    responses(
        (status = 200, description = "Book instance created", body = BookInstance),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<BookInstanceIn>,
) -> AppResult<Json<BookInstance>> {
    let instance = state.services.instances.create(&data).await?;
    Ok(Json(instance))
}

/// Replace every field of a copy
#[utoipa::path(
    put,
    path = "/instances/{id}/",
    tag = "instances",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Book instance ID")),
    request_body = BookInstanceIn,
    responses(
        (status = 200, description = "Book instance updated", body = BookInstance),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Book instance not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(data): Json<BookInstanceIn>,
) -> AppResult<Json<BookInstance>> {
    let instance = state.services.instances.update(id, &data).await?;
    Ok(Json(instance))
}

/// Delete copy
#[utoipa::path(
    delete,
    path = "/instances/{id}/",
    tag = "instances",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 204, description = "Book instance deleted"),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Book instance not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_instance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.instances.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
