use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use common::rpc::{CreateUserRequest, GetUserRequest};

use crate::client::UserStoreClient;
use crate::errors::GatewayError;

#[derive(Clone)]
pub struct GatewayState {
    pub store: Arc<dyn UserStoreClient>,
}

impl GatewayState {
    pub fn new(store: Arc<dyn UserStoreClient>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateUserBody {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Reply to `POST /users`. A duplicate id is `success: false` with status 200.
#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CreateUserResult {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// `POST /users`
pub async fn create_user(
    State(state): State<GatewayState>,
    payload: Result<Json<CreateUserBody>, JsonRejection>,
) -> Result<Json<CreateUserResult>, GatewayError> {
    let Json(body) = payload?;
    let req = CreateUserRequest { id: body.id, name: body.name, email: body.email };
    let resp = state.store.create_user(req).await?;
    Ok(Json(CreateUserResult { success: resp.success, message: resp.message }))
}

/// `GET /users/:user_id`
pub async fn get_user(
    State(state): State<GatewayState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserView>, GatewayError> {
    let resp = state.store.get_user(GetUserRequest { id: user_id }).await?;
    if !resp.found {
        return Err(GatewayError::NotFound);
    }
    Ok(Json(UserView { id: resp.id, name: resp.name, email: resp.email }))
}

pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/:user_id", get(get_user))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx, i.e. store calls that did not complete
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
