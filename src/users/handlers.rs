use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
    users::{dto::RegisterRequest, repo::User},
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(register_user))
        .route("/users/:user_id", get(get_user))
        .route("/users/by-email/:email", get(get_user_by_email))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = User::list(&state.db).await?;
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<User>> {
    match User::find_by_id(&state.db, user_id).await? {
        Some(user) => Ok(Json(user)),
        None => {
            warn!(user_id, "user not found");
            Err(ApiError::NotFound("user not found"))
        }
    }
}

#[instrument(skip(state))]
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<User>> {
    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or(ApiError::NotFound("user not found"))?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<Json<User>> {
    let user = User::create(
        &state.db,
        &payload.username,
        &payload.email,
        &payload.password_hash,
    )
    .await?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(Json(user))
}
