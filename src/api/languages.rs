//! Language API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::language::{Language, LanguageIn},
};

use super::AuthenticatedUser;

/// List all languages
#[utoipa::path(
    get,
    path = "/languages/",
    tag = "languages",
    responses(
        (status = 200, description = "Language list", body = Vec<Language>)
    )
)]
pub async fn list_languages(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Language>>> {
    let languages = state.services.languages.list().await?;
    Ok(Json(languages))
}

/// Get language by ID
#[utoipa::path(
    get,
    path = "/languages/{id}/",
    tag = "languages",
    params(("id" = i32, Path, description = "Language ID")),
    responses(
        (status = 200, description = "Language details", body = Language),
        (status = 404, description = "Language not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_language(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Language>> {
    let language = state.services.languages.get_by_id(id).await?;
    Ok(Json(language))
}

/// Create language
#[utoipa::path(
    post,
    path = "/languages/",
    tag = "languages",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    request_body = LanguageIn,
    responses(
        (status = 200, description = "Language created", body = Language),
        (status = 400, description = "Invalid payload", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_language(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(data): Json<LanguageIn>,
) -> AppResult<Json<Language>> {
    let language = state.services.languages.create(&data).await?;
    Ok(Json(language))
}

/// Replace every field of a language
#[utoipa::path(
    put,
    path = "/languages/{id}/",
    tag = "languages",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Language ID")),
    request_body = LanguageIn,
    responses(
        (status = 200, description = "Language updated", body = Language),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Language not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_language(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<LanguageIn>,
) -> AppResult<Json<Language>> {
    let language = state.services.languages.update(id, &data).await?;
    Ok(Json(language))
}

/// Delete language
#[utoipa::path(
    delete,
    path = "/languages/{id}/",
    tag = "languages",
    security(("session_cookie" = []), ("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Language ID")),
    responses(
        (status = 204, description = "Language deleted"),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse),
        (status = 404, description = "Language not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_language(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.languages.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
