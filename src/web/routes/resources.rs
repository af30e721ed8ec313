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
    generation::ResourcePreference,
    model::{ResourceTyped, entity::LearningResource},
    web::{
        AppState, SessionContext, WebError, WebResult, error::ErrorResponse, middlewares,
        routes::require_module,
    },
};

#[derive(Debug, Deserialize)]
pub struct ResourceQuery {
    pub module_name: String,
    pub resource_type: Option<ResourcePreference>,
    pub path_id: Option<Uuid>,
}

pub fn routes<S: Clone + Send + Sync + 'static>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(resources_list_handler))
        .layer(middleware::from_fn(middlewares::session_context_fn))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/resources",
    description = "Lists the learning resources of a module. Without `path_id` the most recently generated module with that name is used. \
                   `resource_type` = mixed (or absent) returns every kind.",
    params(
        ("module_name" = String, Query, description = "Name of the module"),
        ("resource_type" = Option<ResourcePreference>, Query, description = "Filter by kind"),
        ("path_id" = Option<Uuid>, Query, description = "Path the module belongs to"),
    ),
    responses(
        (status = 200, description = "Resources of the module, possibly empty", body = Vec<LearningResource>),
        (status = 404, description = "Module not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "content"
)]
async fn resources_list_handler(
    session: SessionContext,
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> WebResult<impl IntoResponse> {
    let module = require_module(&state, &query.module_name, query.path_id).await?;

    let kind = query.resource_type.and_then(|preference| preference.kind());
    let resources = LearningResource::list_for_module(state.pool(), module.id(), kind)
        .await
        .map_err(|e| WebError::resource_fetch_error(LearningResource::get_resource_type(), e))?;

    state
        .sessions()
        .update(session.sid(), |s| s.select_module(module.path_id(), module.name()))
        .await;

    Ok((StatusCode::OK, Json(resources)))
}
