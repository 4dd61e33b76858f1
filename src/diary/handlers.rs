use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

use super::dto::{AddLineParams, CreateEntryParams, UpdateLineParams};
use super::repo::{DiaryEntry, DiaryLine};

pub fn diary_routes() -> Router<AppState> {
    Router::new()
        .route("/diary", post(create_diary_entry))
        .route("/diary/:diary_id", get(list_diary_lines))
        .route("/diary/:diary_id/lines", post(add_diary_line))
        .route("/diary/:diary_id/lines/:line_id", put(update_diary_line))
}

/// POST /diary/?user_id=
#[instrument(skip(state))]
pub async fn create_diary_entry(
    State(state): State<AppState>,
    Query(params): Query<CreateEntryParams>,
) -> ApiResult<Json<DiaryEntry>> {
    let Some(entry) = DiaryEntry::create_for_user(&state.db, params.user_id).await? else {
        warn!(user_id = params.user_id, "diary entry for unknown user");
        return Err(ApiError::NotFound("user not found"));
    };

    info!(diary_id = entry.id, user_id = entry.user_id, "diary entry created");
    Ok(Json(entry))
}

/// POST /diary/{diary_id}/lines/?line_order=&language=&content=
#[instrument(skip(state, params))]
pub async fn add_diary_line(
    State(state): State<AppState>,
    Path(diary_id): Path<i64>,
    Query(params): Query<AddLineParams>,
) -> ApiResult<Json<DiaryLine>> {
    let line = DiaryLine::create(
        &state.db,
        diary_id,
        params.line_order,
        &params.language,
        &params.content,
    )
    .await?;

    info!(
        line_id = line.id,
        diary_id,
        line_order = line.line_order,
        language = %line.language,
        "diary line added"
    );
    Ok(Json(line))
}

#[instrument(skip(state))]
pub async fn list_diary_lines(
    State(state): State<AppState>,
    Path(diary_id): Path<i64>,
) -> ApiResult<Json<Vec<DiaryLine>>> {
    let lines = DiaryLine::list_by_diary(&state.db, diary_id).await?;
    Ok(Json(lines))
}

/// PUT /diary/{diary_id}/lines/{line_id}/?new_content=
#[instrument(skip(state, params))]
pub async fn update_diary_line(
    State(state): State<AppState>,
    Path((diary_id, line_id)): Path<(i64, i64)>,
    Query(params): Query<UpdateLineParams>,
) -> ApiResult<Json<DiaryLine>> {
    match DiaryLine::update_content(&state.db, diary_id, line_id, &params.new_content).await? {
        Some(line) => Ok(Json(line)),
        None => {
            warn!(diary_id, line_id, "diary line not found");
            Err(ApiError::NotFound("diary line not found"))
        }
    }
}
