use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    model::{ResourceTyped, entity::Exercise},
    web::{
        AppState, SessionContext, WebError, WebResult, dto::ExerciseResponse,
        error::ErrorResponse, middlewares, routes::require_module,
    },
};

#[derive(Debug, Deserialize)]
pub struct ExerciseQuery {
    pub module_name: String,
    pub path_id: Option<Uuid>,
}

pub fn routes<S: Clone + Send + Sync + 'static>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(exercises_list_handler))
        .layer(middleware::from_fn(middlewares::session_context_fn))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/exercises",
    description = "Lists the exercises of a module with options decoded. Without `path_id` the most recently generated module with that name is used.",
    params(
        ("module_name" = String, Query, description = "Name of the module"),
        ("path_id" = Option<Uuid>, Query, description = "Path the module belongs to"),
    ),
    responses(
        (status = 200, description = "Exercises of the module, possibly empty", body = Vec<ExerciseResponse>),
        (status = 404, description = "Module not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "content"
)]
async fn exercises_list_handler(
    session: SessionContext,
    State(state): State<AppState>,
    Query(query): Query<ExerciseQuery>,
) -> WebResult<impl IntoResponse> {
    let module = require_module(&state, &query.module_name, query.path_id).await?;

    let exercises = Exercise::list_for_module(state.pool(), module.id())
        .await
        .and_then(ExerciseResponse::from_rows)
        .map_err(|e| WebError::resource_fetch_error(Exercise::get_resource_type(), e))?;

    state
        .sessions()
        .update(session.sid(), |s| s.select_module(module.path_id(), module.name()))
        .await;

    Ok((StatusCode::OK, Json(exercises)))
}
