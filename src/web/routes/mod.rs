use axum::Router;
use serde::Deserialize;
use tower_cookies::CookieManagerLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use crate::model::{
    CrudRepository, ResourceTyped,
    entity::{LearningModule, LearningPath},
};
use crate::web::{AppState, WebError, WebResult, doc::ApiDoc};

pub mod answers;
pub mod exercises;
pub mod paths;
pub mod progress;
pub mod resources;
pub mod session;

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct PaginationQuery {
    limit: i64,
    offset: i64,
}

pub fn build_app<S: Clone + Send + Sync + 'static>(state: AppState, docs: bool) -> Router<S> {
    let mut router = Router::new()
        .nest("/api/v1/paths", paths::routes(state.clone()))
        .nest("/api/v1/resources", resources::routes(state.clone()))
        .nest("/api/v1/exercises", exercises::routes(state.clone()))
        .nest("/api/v1/progress", progress::routes(state.clone()))
        .nest("/api/v1/answers", answers::routes(state.clone()))
        .nest("/api/v1/session", session::routes(state.clone()))
        .layer(CookieManagerLayer::default())
        .layer(CorsLayer::very_permissive());

    if docs {
        let openapi = ApiDoc::openapi();

        router = router.merge(SwaggerUi::new("/api/v1/docs").url("/api-doc/openapi.json", openapi));
    }

    router
}

/// Fails with 404 when the path does not exist.
pub(crate) async fn require_path(state: &AppState, path_id: Uuid) -> WebResult<LearningPath> {
    LearningPath::find_by_id(state.pool(), path_id)
        .await
        .map_err(|e| WebError::resource_fetch_error(LearningPath::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(LearningPath::get_resource_type()))
}

/// Module lookup by name, narrowed to one path when `path_id` is given.
pub(crate) async fn require_module(
    state: &AppState,
    module_name: &str,
    path_id: Option<Uuid>,
) -> WebResult<LearningModule> {
    LearningModule::find_by_name(state.pool(), module_name, path_id)
        .await
        .map_err(|e| WebError::resource_fetch_error(LearningModule::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(LearningModule::get_resource_type()))
}
