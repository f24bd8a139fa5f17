//! User HTTP handlers.

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::{JsonBody, ValidatedJson};
use crate::api::AppState;
use crate::config::USERS_PATH;
use crate::domain::{Lookup, User, UserDetails, UserId, UserPatch, UserPayload};
use crate::errors::AppResult;
use crate::types::{Created, NoContent};

/// User routes, mounted under `/api/users`
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user))
        .route("/search", get(search_users))
        .route(
            "/:id",
            get(get_user)
                .put(update_user)
                .patch(update_partial_user)
                .delete(delete_user),
        )
}

/// Inclusive birth date range
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BirthDateRange {
    /// First birth date to include (YYYY-MM-DD)
    #[param(example = "2000-01-01")]
    pub from: NaiveDate,
    /// Last birth date to include (YYYY-MM-DD)
    #[param(example = "2000-12-31")]
    pub to: NaiveDate,
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created",
            headers(("Location" = String, description = "Path of the new user"))),
        (status = 400, description = "Validation failed, or below the age requirement", body = Vec<String>)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> AppResult<Created> {
    let details = UserDetails::try_from(payload)?;
    let user = state.user_service.create_user(details).await?;
    Ok(Created::at(format!("{}/{}", USERS_PATH, user.id)))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<Lookup<User>> {
    state.user_service.get_user(id).await
}

/// Replace every field of a user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, description = "Validation failed", body = Vec<String>),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> AppResult<Lookup<User>> {
    let details = UserDetails::try_from(payload)?;
    state.user_service.update_user(id, details).await
}

/// Update only the provided fields of a user
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_partial_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    JsonBody(patch): JsonBody<UserPatch>,
) -> AppResult<Lookup<User>> {
    state.user_service.update_partial_user(id, patch).await
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<NoContent> {
    state.user_service.delete_user(id).await?;
    Ok(NoContent)
}

/// Find users born within a date range
#[utoipa::path(
    get,
    path = "/api/users/search",
    tag = "Users",
    params(BirthDateRange),
    responses(
        (status = 200, description = "Matching users", body = Vec<User>),
        (status = 400, description = "From date is after To date", body = String, content_type = "text/plain")
    )
)]
pub async fn search_users(
    State(state): State<AppState>,
    Query(range): Query<BirthDateRange>,
) -> AppResult<axum::Json<Vec<User>>> {
    let users = state
        .user_service
        .search_users_by_birth_date_range(range.from, range.to)
        .await?;
    Ok(axum::Json(users))
}
