use tokio::signal;

/// Resolves on Ctrl+C, letting axum finish in-flight requests. A running
/// generation is not cancelled, so shutdown may wait for the model.
pub async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("unable to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }

    #[cfg(not(windows))]
    println!();
    tracing::info!("Ctrl+C received. Please wait, this could take a while.");
}
