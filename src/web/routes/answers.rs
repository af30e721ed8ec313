use axum::{
    Json, Router, extract::State, http::StatusCode, middleware, response::IntoResponse,
    routing::put,
};

use crate::{
    model::{
        ResourceTyped,
        entity::{AnswerRecord, AnswerRecordUpsert},
    },
    web::{
        AppState, SessionAnswer, SessionContext, WebError, WebResult,
        dto::AnswerUpsertResponse, error::ErrorResponse, middlewares, routes::require_path,
    },
};

pub fn routes<S: Clone + Send + Sync + 'static>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", put(answer_upsert_handler))
        .layer(middleware::from_fn(middlewares::session_context_fn))
        .with_state(state)
}

#[utoipa::path(
    put,
    path = "/api/v1/answers",
    request_body = AnswerRecordUpsert,
    description = "Stores the learner's answer to an exercise. Only the latest answer per path, module and exercise is kept.",
    responses(
        (status = 200, description = "Answer stored", body = AnswerUpsertResponse),
        (status = 404, description = "Path not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "progress"
)]
async fn answer_upsert_handler(
    session: SessionContext,
    State(state): State<AppState>,
    Json(payload): Json<AnswerRecordUpsert>,
) -> WebResult<impl IntoResponse> {
    require_path(&state, payload.path_id).await?;

    let record = AnswerRecord::upsert(state.pool(), payload)
        .await
        .map_err(|e| WebError::resource_fetch_error(AnswerRecord::get_resource_type(), e))?;

    let answer = SessionAnswer {
        exercise_id: record.exercise_id(),
        module_name: record.module_name().to_string(),
        user_answer: record.user_answer().to_string(),
        is_correct: record.is_correct(),
    };
    state
        .sessions()
        .update(session.sid(), |s| s.record_answer(record.path_id(), answer))
        .await;

    Ok((StatusCode::OK, Json(AnswerUpsertResponse::from(&record))))
}
