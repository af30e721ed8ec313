use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::put};

use crate::{
    model::{
        ResourceTyped,
        entity::{ProgressRecord, ProgressRecordUpsert},
    },
    web::{
        AppState, WebError, WebResult, dto::ProgressUpsertResponse, error::ErrorResponse,
        routes::require_path,
    },
};

pub fn routes<S: Clone + Send + Sync + 'static>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", put(progress_upsert_handler))
        .with_state(state)
}

#[utoipa::path(
    put,
    path = "/api/v1/progress",
    request_body = ProgressRecordUpsert,
    description = "Stores the learner's status and accuracy for a module. Resubmitting for the same path and module updates the record in place.",
    responses(
        (status = 200, description = "Progress stored", body = ProgressUpsertResponse),
        (status = 404, description = "Path not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "progress"
)]
async fn progress_upsert_handler(
    State(state): State<AppState>,
    Json(payload): Json<ProgressRecordUpsert>,
) -> WebResult<impl IntoResponse> {
    require_path(&state, payload.path_id).await?;

    let record = ProgressRecord::upsert(state.pool(), payload)
        .await
        .map_err(|e| WebError::resource_fetch_error(ProgressRecord::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(ProgressUpsertResponse::from(record))))
}
