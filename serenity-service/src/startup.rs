//! Application startup and lifecycle management.

use crate::config::SerenityConfig;
use crate::handlers;
use crate::services::providers::{AzureOpenAiProvider, CompletionProvider};
use crate::services::{AffirmationStore, ChatGateway, PgAffirmationStore};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use service_core::error::AppError;
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state. Everything in it is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AffirmationStore>,
    pub chat: ChatGateway,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(store: Arc<dyn AffirmationStore>, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            store,
            chat: ChatGateway::new(provider),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}

/// Build the HTTP router. Cross-origin requests are allowed from anywhere.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/affirm", get(handlers::get_affirmations))
        .route("/chat", post(handlers::chat))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            },
        ))
        .layer(from_fn(request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Wire the production gateways from `config` and bind the listener.
    pub async fn build(config: SerenityConfig) -> Result<Self, AppError> {
        let store: Arc<dyn AffirmationStore> = Arc::new(PgAffirmationStore::new(&config.database));

        let provider: Arc<dyn CompletionProvider> = Arc::new(
            AzureOpenAiProvider::new(config.openai.clone(), config.search.clone())
                .map_err(|e| AppError::InternalError(anyhow::Error::new(e)))?,
        );

        tracing::info!(
            deployment = %config.openai.chat_deployment,
            index = %config.search.index_name,
            "Initialized Azure OpenAI provider"
        );

        let state = AppState::new(store, provider)
            .with_metrics(service_core::observability::init_metrics());

        Self::with_state(config.common.port, state).await
    }

    /// Bind the listener for an already assembled state (port 0 = random port).
    pub async fn with_state(port: u16, state: AppState) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("serenity-service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, build_router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
