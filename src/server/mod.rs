//! Development file server that defeats every layer of HTTP caching.
//!
//! Static files are served by `tower-http`'s [`ServeDir`]. Two layers wrap it:
//! one strips conditional request headers so a `304 Not Modified` is never
//! produced, the other overwrites the caching headers on every response,
//! errors included. Directories without an `index.html` fall through to
//! [`listing::list_directory`].

pub mod listing;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::Request;
use axum::handler::Handler;
use axum::http::{HeaderName, HeaderValue, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub const DEFAULT_PORT: u16 = 8000;

pub const CACHE_CONTROL_VALUE: &str = "no-store, no-cache, must-revalidate, max-age=0";
pub const PRAGMA_VALUE: &str = "no-cache";
pub const EXPIRES_VALUE: &str = "0";

/// Request headers that would let the file service answer `304 Not Modified`.
pub static CONDITIONAL_HEADERS: [HeaderName; 2] = [header::IF_MODIFIED_SINCE, header::IF_NONE_MATCH];

/// Builds the router serving `root`.
pub fn router(root: impl Into<PathBuf>) -> Router {
    let root = Arc::new(root.into());
    let listing = listing::list_directory.with_state(Arc::clone(&root));
    let files = ServeDir::new(root.as_path()).fallback(listing);

    Router::new()
        .fallback_service(files)
        .layer(middleware::from_fn(strip_conditional_headers))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_VALUE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static(PRAGMA_VALUE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static(EXPIRES_VALUE),
        ))
        .layer(TraceLayer::new_for_http())
}

async fn strip_conditional_headers(mut request: Request, next: Next) -> Response {
    let headers = request.headers_mut();
    for name in &CONDITIONAL_HEADERS {
        headers.remove(name);
    }
    next.run(request).await
}

/// Serves `root` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, root: PathBuf, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!(root = %root.display(), addr = %listener.local_addr()?, "serving without caching");
    axum::serve(listener, router(root))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
pub async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        },
    }
}
