use axum::{
    Json, Router, extract::State, http::StatusCode, middleware, response::IntoResponse,
    routing::get,
};
use tower_cookies::{Cookie, Cookies};

use crate::web::{
    AppState, LearnerSession, SessionContext, WebResult,
    middlewares::{self, SESSION_COOKIE},
};

pub fn routes<S: Clone + Send + Sync + 'static>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(session_get_handler).delete(session_delete_handler))
        .layer(middleware::from_fn(middlewares::session_context_fn))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/session",
    description = "Current learner session: path being browsed, selected module and answers given in this session",
    responses(
        (status = 200, description = "Session returned", body = LearnerSession),
    ),
    tag = "session",
    security(
        ("cookie" = [])
    )
)]
async fn session_get_handler(
    session: SessionContext,
    State(state): State<AppState>,
) -> WebResult<impl IntoResponse> {
    let current = state.sessions().get(session.sid()).await;
    Ok((StatusCode::OK, Json(current)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/session",
    description = "Forgets the learner session and removes its cookie",
    responses(
        (status = 204, description = "Session cleared"),
    ),
    tag = "session",
    security(
        ("cookie" = [])
    )
)]
async fn session_delete_handler(
    session: SessionContext,
    State(state): State<AppState>,
    cookies: Cookies,
) -> WebResult<impl IntoResponse> {
    state.sessions().remove(session.sid()).await;

    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookies.remove(cookie);

    Ok(StatusCode::NO_CONTENT)
}
