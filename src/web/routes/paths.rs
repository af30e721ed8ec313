use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    generation::GenerationRequest,
    model::{
        PaginatableRepository, ResourceTyped,
        entity::{AnswerRecord, AnswerStats, LearningModule, LearningPath, ProgressRecord},
    },
    web::{
        AppState, SessionContext, WebError, WebResult,
        dto::{GeneratePathResponse, PathDetailResponse},
        error::ErrorResponse,
        middlewares,
        routes::{PaginationQuery, require_path},
    },
};

#[derive(Debug, Deserialize)]
pub struct AccuracyQuery {
    pub module_name: Option<String>,
}

pub fn routes<S: Clone + Send + Sync + 'static>(state: AppState) -> Router<S> {
    Router::new()
        .route("/generate", post(path_generate_handler))
        .route("/page", get(path_page_handler))
        .route("/{id}", get(path_get_handler))
        .route("/{id}/accuracy", get(path_accuracy_handler))
        .layer(middleware::from_fn(middlewares::session_context_fn))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/api/v1/paths/generate",
    request_body = GenerationRequest,
    description = "Generates a tiered skill tree for the learning goal and stores it together with per-module resources and exercises. \
                   Modules whose resources or exercises could not be generated are kept with empty lists.",
    responses(
        (status = 200, description = "Path generated", body = GeneratePathResponse),
        (status = 400, description = "Learning goal is empty", body = ErrorResponse),
        (status = 502, description = "Language model failed or its skill tree could not be parsed", body = ErrorResponse),
        (status = 504, description = "Language model timed out", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "paths"
)]
async fn path_generate_handler(
    session: SessionContext,
    State(state): State<AppState>,
    Json(payload): Json<GenerationRequest>,
) -> WebResult<impl IntoResponse> {
    if payload.target.trim().is_empty() {
        return Err(WebError::resource_bad_request(
            LearningPath::get_resource_type(),
            "learning goal is empty",
        ));
    }

    let generated = state.orchestrator().generate(&payload).await?;

    let path_id = generated.path.id();
    state
        .sessions()
        .update(session.sid(), |s| s.start_path(path_id))
        .await;

    Ok((StatusCode::OK, Json(GeneratePathResponse::from(generated))))
}

#[utoipa::path(
    get,
    path = "/api/v1/paths/page",
    description = "Lists stored paths, newest first",
    params(
        ("limit" = i64, Query, description = "Page size"),
        ("offset" = i64, Query, description = "Number of paths to skip"),
    ),
    responses(
        (status = 200, description = "Returns requested page", body = crate::model::Page<LearningPath>),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "paths"
)]
async fn path_page_handler(
    Query(page): Query<PaginationQuery>,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let paths = LearningPath::page(state.pool(), page.limit, page.offset)
        .await
        .map_err(|e| WebError::resource_fetch_error(LearningPath::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(paths)))
}

#[utoipa::path(
    get,
    path = "/api/v1/paths/{id}",
    description = "Fetches a path with its modules in tree order and the recorded progress",
    params(
        ("id" = Uuid, Path, description = "ID of the path")
    ),
    responses(
        (status = 200, description = "Path found", body = PathDetailResponse),
        (status = 404, description = "Path not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "paths"
)]
async fn path_get_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> WebResult<impl IntoResponse> {
    let path = require_path(&state, id).await?;

    let modules = LearningModule::list_for_path(state.pool(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(LearningModule::get_resource_type(), e))?;
    let progress = ProgressRecord::list_for_path(state.pool(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(ProgressRecord::get_resource_type(), e))?;

    Ok((
        StatusCode::OK,
        Json(PathDetailResponse {
            path,
            modules,
            progress,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/paths/{id}/accuracy",
    description = "Answer accuracy of a path, or of one of its modules when `module_name` is given. \
                   Accuracy is a percentage rounded to two decimals and 0 when nothing was answered.",
    params(
        ("id" = Uuid, Path, description = "ID of the path"),
        ("module_name" = Option<String>, Query, description = "Restrict to one module"),
    ),
    responses(
        (status = 200, description = "Accuracy computed", body = AnswerStats),
        (status = 404, description = "Path not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "paths"
)]
async fn path_accuracy_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AccuracyQuery>,
) -> WebResult<impl IntoResponse> {
    require_path(&state, id).await?;

    let stats = AnswerRecord::stats(state.pool(), id, query.module_name.as_deref())
        .await
        .map_err(|e| WebError::resource_fetch_error(AnswerRecord::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(stats)))
}
