use std::sync::Arc;

use crate::generation::Temperatures;
use crate::llm::{ChatClient, ModelGateway};
use crate::model::{DbConnection, ModelManager};
use crate::utils::signal::shutdown_signal;
use crate::{error::AppResult, web::AppState};
use axum::Router;
use tokio::net::TcpListener;

pub mod config;
pub use config::{Config, ConfigError, ConfigResult};

pub mod error;
pub mod generation;
pub mod llm;
pub mod model;
pub mod utils;
pub mod web;

static APPLICATION_NAME: &str = "skilltree";

pub async fn build_server() -> AppResult<(AppState, Router)> {
    let use_local = cfg!(debug_assertions);
    let config = config::Config::get_or_init(use_local).await;

    let db = DbConnection::connect(config.app().database_uri())?;
    db.migrate().await?;

    let gateway = ChatClient::from_config(config.llm())?;
    tracing::info!("using model {} at {}", gateway.model(), gateway.endpoint());

    let mm = ModelManager::new(db);
    let state = AppState::new(mm, Arc::new(gateway), Temperatures::from_config(config.llm()))
        .with_session_idle_timeout(config.app().session_idle_timeout());
    let app = web::routes::build_app(state.clone(), config.app().docs());
    Ok((state, app))
}

/// Server over an existing pool and gateway, with default temperatures and
/// without API docs. Migrations are the caller's business.
pub async fn build_server_with_pool(
    db: DbConnection,
    gateway: Arc<dyn ModelGateway>,
) -> AppResult<(AppState, Router)> {
    let mm = ModelManager::new(db);
    let state = AppState::new(mm, gateway, Temperatures::default());
    let app = web::routes::build_app(state.clone(), false);
    Ok((state, app))
}

#[tracing::instrument]
pub async fn setup_workers() -> AppResult<()> {
    let (_, app) = build_server().await?;
    let config = Config::get_or_init(false).await;
    let listener = TcpListener::bind(config.host().bindto()).await?;

    tracing::info!("axum is starting at: {}", config.host().bindto());
    let axum_handle = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    axum_handle.await?;
    Ok(())
}

pub fn setup_trace() {
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

    // load .env file for RUST_LOG etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .with(ErrorLayer::default())
        .init();

    tracing::debug!("tracing initialized.");
}

#[tracing::instrument]
pub async fn run() -> AppResult<()> {
    setup_trace();
    setup_workers().await?;
    Ok(())
}
