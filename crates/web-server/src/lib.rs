use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use database::ItemRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "stockroom";

/// The shared application state that all handlers can access.
///
/// The repository (and with it the connection pool) is constructed by the
/// binary and injected here; handlers never reach for ambient globals.
pub struct AppState {
    pub repo: ItemRepository,
    pub version: String,
}

/// Builds the application router: routes, state, and the middleware stack.
///
/// Split out from `run_server` so tests can drive the exact production
/// router in-process.
pub fn app_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/ready", get(handlers::ready))
        .route(
            "/api/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/api/items/:id",
            get(handlers::get_item).delete(handlers::delete_item),
        )
        .fallback(handlers::route_not_found)
        .with_state(state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        // Any panic inside a handler becomes a generic 500 envelope.
        .layer(CatchPanicLayer::custom(error::handle_panic))
}

/// The main function to configure and run the web server.
///
/// Shutdown is ordered: on SIGINT/SIGTERM the listener stops accepting,
/// in-flight handlers run to completion, and only then is the connection
/// pool drained. This is the one lifecycle guarantee the system makes.
pub async fn run_server(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let repo = state.repo.clone();
    let app = app_router(state);

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped accepting connections; draining the connection pool.");
    repo.close().await;
    tracing::info!("Database pool closed.");

    Ok(())
}

/// Resolves when the process receives SIGINT (ctrl-c) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, closing server...");
}
