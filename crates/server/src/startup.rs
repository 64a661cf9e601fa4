use std::future::Future;

use axum::Router;
use configs::StoreConfig;
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::{self, StoreState};

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

/// Public entry: build the store with an empty table and run the RPC server.
pub async fn run<F>(cfg: StoreConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = routes::build_router(StoreState::default(), cfg.max_concurrency);

    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        service = "server",
        event = "listening",
        addr = %listener.local_addr()?,
        max_concurrency = cfg.max_concurrency,
        "record store service listening"
    );
    serve(listener, app, shutdown).await
}
