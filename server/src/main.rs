use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod codegen;
mod config;
mod error;
mod handlers;
mod links;
mod store;

use codegen::CodeGenerator;
use config::AppConfig;
use store::LinkStore;

// ── Shared application state ───────────────────────────────────────────────

/// Built once at startup and handed to every handler behind an `Arc`.
pub struct AppState {
    pub config: AppConfig,
    pub store: LinkStore,
    pub codes: CodeGenerator,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let codes = CodeGenerator::new(config.code_length);
        Self {
            config,
            store: LinkStore::new(),
            codes,
        }
    }
}

// ── Router ─────────────────────────────────────────────────────────────────

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/shorten",
            post(handlers::shorten::shorten).fallback(handlers::shorten::method_not_allowed),
        )
        // HEAD would otherwise be served by the GET handler.
        .route(
            "/",
            get(handlers::redirect::missing_code)
                .head(handlers::redirect::method_not_allowed)
                .fallback(handlers::redirect::method_not_allowed),
        )
        // /shorten is matched before the capture; codegen never issues it.
        .route(
            "/:code",
            get(handlers::redirect::redirect)
                .head(handlers::redirect::method_not_allowed)
                .fallback(handlers::redirect::method_not_allowed),
        )
        .fallback(handlers::redirect::unmatched)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// ── Entry point ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (ignore error if file is absent — env vars may already be set)
    dotenvy::dotenv().ok();

    // Initialise structured logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snip=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!("Starting snip on {}", config.bind_addr());
    tracing::info!("Base URL: {}", config.base_url);

    let bind_addr = config.bind_addr();
    let state = Arc::new(AppState::new(config));
    tracing::info!(
        "Issuing {}-character short codes",
        state.codes.length()
    );

    let app = router(state);

    // ── Serve ──────────────────────────────────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
