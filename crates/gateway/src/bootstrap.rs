use std::future::Future;
use std::sync::Arc;

use axum::Router;
use configs::GatewayConfig;
use tokio::net::TcpListener;
use tracing::info;

use crate::client::HttpUserStoreClient;
use crate::routes::{self, GatewayState};

/// Wire the HTTP store client into the gateway router.
pub fn build_app(cfg: &GatewayConfig) -> anyhow::Result<Router> {
    let client = HttpUserStoreClient::from_config(cfg)?;
    Ok(routes::build_router(GatewayState::new(Arc::new(client))))
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

pub async fn run<F>(cfg: GatewayConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(&cfg)?;
    let listener = TcpListener::bind(cfg.bind_addr()).await?;
    info!(
        service = "gateway",
        event = "listening",
        addr = %listener.local_addr()?,
        store_url = %cfg.store_url,
        request_timeout_secs = cfg.request_timeout_secs,
        "gateway listening"
    );
    serve(listener, app, shutdown).await
}
