// [library] Error handling crate - `Result<T>` is `Result<T, anyhow::Error>` for startup failures
use anyhow::Result;

// [library] HTTP utilities from axum web framework
use axum::http::{
    header::{ACCEPT, CONTENT_TYPE},
    HeaderValue, Method,
};

// [business] Library modules - configuration, pool lifecycle and the router
use lightbnb::{
    config::Config,
    db::{close_pool, create_pool},
    web::{create_app_router, AppState},
};

// [library] Tower ecosystem - middleware for HTTP servers
use tower_http::{
    cors::CorsLayer,   // [security] Cross-Origin Resource Sharing middleware
    trace::TraceLayer, // [library] HTTP request/response logging middleware
};

// [library] Structured logging framework
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

// [rust] Attribute macro that runs main inside tokio's multi-threaded runtime
#[tokio::main]
async fn main() -> Result<()> {
    // [library] Initialize structured logging; RUST_LOG overrides the default filter
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("lightbnb=info,tower_http=debug")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting LightBnB");

    // [business] Load application configuration - fail fast on missing secrets
    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    // [business] Process-wide pool, created once and injected into the router
    info!("Connecting to database...");
    let db = create_pool(&config.database).await?;
    info!("Database connection established and migrations applied");

    // [security] Convert allowed origins from config to HeaderValue format for CORS
    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let state = AppState::new(db.clone(), &config)?;
    let app = create_app_router(state)
        .layer(
            // [security] Session cookies require credentialed CORS with explicit origins
            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([ACCEPT, CONTENT_TYPE])
                .allow_credentials(true),
        )
        .layer(TraceLayer::new_for_http());

    info!("Server starting on {}", bind_address);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    // [library] Serve until Ctrl-C / SIGTERM, letting in-flight requests finish
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // [business] Return pooled connections before the process exits
    info!("Server stopped, closing database pool");
    close_pool(&db).await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
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

    info!("Shutdown signal received");
}
