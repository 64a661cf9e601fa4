use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::post, Router};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;

use gateway::routes::{self, GatewayState};
use gateway::HttpUserStoreClient;
use server::routes::StoreState;

async fn spawn(app: Router) -> anyhow::Result<String> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });
    Ok(format!("http://{}:{}", addr.ip(), addr.port()))
}

async fn start_gateway(store_url: &str, request_timeout: Duration) -> anyhow::Result<String> {
    let client = HttpUserStoreClient::new(store_url, Duration::from_secs(1), request_timeout)?;
    spawn(routes::build_router(GatewayState::new(Arc::new(client)))).await
}

/// Gateway wired to a freshly started record store.
async fn start_stack() -> anyhow::Result<String> {
    let store_url = spawn(server::routes::build_router(StoreState::default(), 10)).await?;
    start_gateway(&store_url, Duration::from_secs(5)).await
}

/// An address nothing listens on.
async fn dead_store_url() -> anyhow::Result<String> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}:{}", addr.ip(), addr.port()))
}

#[tokio::test]
async fn e2e_create_duplicate_and_get() -> anyhow::Result<()> {
    let base = start_stack().await?;
    let c = reqwest::Client::new();
    let body = json!({"id": "u1", "name": "Ann", "email": "ann@x.com"});

    let res = c.post(format!("{base}/users")).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"success": true, "message": "User created"}));

    let res = c.post(format!("{base}/users")).json(&body).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(
        res.json::<serde_json::Value>().await?,
        json!({"success": false, "message": "User already exists"})
    );

    let res = c.get(format!("{base}/users/u1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"id": "u1", "name": "Ann", "email": "ann@x.com"}));

    let res = c.get(format!("{base}/users/u404")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(res.json::<serde_json::Value>().await?, json!({"detail": "User not found"}));
    Ok(())
}

#[tokio::test]
async fn e2e_invalid_body_is_client_error() -> anyhow::Result<()> {
    let base = start_stack().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{base}/users")).json(&json!({"id": "u1", "name": "Ann"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    // the rejected body must not have created anything
    let res = c.get(format!("{base}/users/u1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_unreachable_store_is_server_error() -> anyhow::Result<()> {
    let base = start_gateway(&dead_store_url().await?, Duration::from_secs(5)).await?;
    let c = reqwest::Client::new();

    let res = c
        .post(format!("{base}/users"))
        .json(&json!({"id": "u1", "name": "Ann", "email": "ann@x.com"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["detail"].as_str().is_some_and(|d| !d.is_empty()));

    let res = c.get(format!("{base}/users/u1")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<serde_json::Value>().await?;
    assert!(body["detail"].as_str().is_some_and(|d| !d.is_empty()));
    Ok(())
}

#[tokio::test]
async fn e2e_slow_store_times_out_as_server_error() -> anyhow::Result<()> {
    let stalled = Router::new().route(
        common::rpc::GET_USER_PATH,
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "{}"
        }),
    );
    let store_url = spawn(stalled).await?;
    let base = start_gateway(&store_url, Duration::from_millis(200)).await?;

    let res = reqwest::get(format!("{base}/users/u1")).await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<serde_json::Value>().await?;
    let detail = body["detail"].as_str().unwrap_or_default();
    assert!(detail.starts_with("record store call timed out"), "detail: {detail}");
    Ok(())
}

#[tokio::test]
async fn e2e_store_error_status_is_server_error() -> anyhow::Result<()> {
    let failing = Router::new().route(
        common::rpc::CREATE_USER_PATH,
        post(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "draining") }),
    );
    let store_url = spawn(failing).await?;
    let base = start_gateway(&store_url, Duration::from_secs(5)).await?;

    let res = reqwest::Client::new()
        .post(format!("{base}/users"))
        .json(&json!({"id": "u1", "name": "Ann", "email": "ann@x.com"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["detail"], "record store responded with status 503: draining");
    Ok(())
}
