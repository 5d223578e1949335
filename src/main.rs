//! Challenge overlay binary entrypoint wiring the update endpoint, SSE stream and overlay page.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use challenge_overlay::{
    config::AppConfig,
    routes::{self, docs::DOCS_PATH},
    state::{AppState, MetadataStore, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::from_env();
    let metadata = MetadataStore::load(&config.metadata_path);
    let app_state = AppState::with_page_template(metadata, config.load_page_template());

    // Build the HTTP router once the shared state is ready.
    let app = routes::app(app_state.clone());

    let addr = config.bind_addr();
    info!(%addr, docs = DOCS_PATH, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal(app_state))
        .await
        .context("serving axum")?;

    info!("server stopped");
    Ok(())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM, then close the SSE streams so the server can drain.
async fn shutdown_signal(state: SharedState) {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    info!("shutdown signal received");
    state.begin_shutdown();
}
