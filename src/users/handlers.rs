use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{error, instrument, warn};

use crate::{
    state::AppState,
    users::{
        dto::User,
        error::UserError,
        extractors::{ApiError, JsonBody, UserId},
        services::UserService,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(get_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user_by_id).put(update_user).delete(delete_user),
        )
}

#[instrument(skip(users))]
pub async fn get_users(State(users): State<UserService>) -> Result<Json<Vec<User>>, ApiError> {
    let all = users.get_users().await.map_err(internal)?;
    Ok(Json(all))
}

#[instrument(skip(users, payload))]
pub async fn create_user(
    State(users): State<UserService>,
    JsonBody(payload): JsonBody<User>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let created = users.create_user(payload).await.map_err(rejected)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(users, payload))]
pub async fn update_user(
    State(users): State<UserService>,
    UserId(id): UserId,
    JsonBody(mut payload): JsonBody<User>,
) -> Result<Json<User>, ApiError> {
    payload.id = id;
    let updated = users.update_user(payload).await.map_err(rejected)?;
    Ok(Json(updated))
}

#[instrument(skip(users))]
pub async fn delete_user(
    State(users): State<UserService>,
    UserId(id): UserId,
) -> Result<StatusCode, ApiError> {
    users.delete_user(id).await.map_err(internal)?;
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(users))]
pub async fn get_user_by_id(
    State(users): State<UserService>,
    UserId(id): UserId,
) -> Result<Json<User>, ApiError> {
    let user = users.get_user_by_id(id).await.map_err(internal)?;
    Ok(Json(user))
}

fn internal(e: UserError) -> ApiError {
    error!(error = %e, "user request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(e.to_string()))
}

fn rejected(e: UserError) -> ApiError {
    match &e {
        UserError::Store(_) => error!(error = %e, "user write failed"),
        _ => warn!(error = %e, "user write rejected"),
    }
    (StatusCode::BAD_REQUEST, Json(e.to_string()))
}
