//! Client side of the record store call contract.

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use common::rpc::{
    CreateUserRequest, CreateUserResponse, GetUserRequest, GetUserResponse, CREATE_USER_PATH, GET_USER_PATH,
};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;

/// A call to the record store that did not complete.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("failed to connect to record store: {0}")]
    Connect(String),
    #[error("record store call timed out: {0}")]
    Timeout(String),
    #[error("record store responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid reply from record store: {0}")]
    Decode(String),
    #[error("record store call failed: {0}")]
    Transport(String),
}

/// Render an error together with its source chain.
fn describe(err: &dyn StdError) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

impl From<reqwest::Error> for CallError {
    fn from(e: reqwest::Error) -> Self {
        let text = describe(&e);
        if e.is_timeout() {
            Self::Timeout(text)
        } else if e.is_connect() {
            Self::Connect(text)
        } else if e.is_decode() {
            Self::Decode(text)
        } else {
            Self::Transport(text)
        }
    }
}

/// The two operations the gateway issues against the record store.
#[async_trait]
pub trait UserStoreClient: Send + Sync {
    async fn create_user(&self, req: CreateUserRequest) -> Result<CreateUserResponse, CallError>;
    async fn get_user(&self, req: GetUserRequest) -> Result<GetUserResponse, CallError>;
}

/// [`UserStoreClient`] speaking JSON RPC over HTTP.
#[derive(Clone)]
pub struct HttpUserStoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpUserStoreClient {
    pub fn new(base_url: &str, connect_timeout: Duration, request_timeout: Duration) -> Result<Self, CallError> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| CallError::Transport(describe(&e)))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn from_config(cfg: &configs::GatewayConfig) -> Result<Self, CallError> {
        Self::new(&cfg.store_url, cfg.connect_timeout(), cfg.request_timeout())
    }

    async fn call<Req, Resp>(&self, path: &str, req: &Req) -> Result<Resp, CallError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "calling record store");
        let resp = self.http.post(&url).json(req).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CallError::Status { status: status.as_u16(), body });
        }
        Ok(resp.json::<Resp>().await?)
    }
}

#[async_trait]
impl UserStoreClient for HttpUserStoreClient {
    async fn create_user(&self, req: CreateUserRequest) -> Result<CreateUserResponse, CallError> {
        self.call(CREATE_USER_PATH, &req).await
    }

    async fn get_user(&self, req: GetUserRequest) -> Result<GetUserResponse, CallError> {
        self.call(GET_USER_PATH, &req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("outer")]
    struct Outer(#[source] Inner);

    #[derive(Debug, Error)]
    #[error("inner")]
    struct Inner;

    #[test]
    fn describe_walks_source_chain() {
        assert_eq!(describe(&Outer(Inner)), "outer: inner");
    }

    #[test]
    fn status_error_carries_body() {
        let e = CallError::Status { status: 503, body: "overloaded".into() };
        assert_eq!(e.to_string(), "record store responded with status 503: overloaded");
    }
}
