use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{debug, Level};

use common::rpc::{
    CreateUserRequest, CreateUserResponse, GetUserRequest, GetUserResponse, CREATE_USER_PATH, GET_USER_PATH,
};
use common::types::Health;
use service::UserService;

use crate::errors::ServerError;

/// Shared handler state: the one user table of this process.
#[derive(Clone, Default)]
pub struct StoreState {
    pub users: UserService,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn create_user(
    State(state): State<StoreState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<CreateUserResponse>, ServerError> {
    let Json(req) = payload?;
    let outcome = state.users.create_user(&req.id, &req.name, &req.email).await;
    debug!(user_id = %req.id, accepted = outcome.accepted(), "CreateUser handled");
    Ok(Json(CreateUserResponse { success: outcome.accepted(), message: outcome.message().to_string() }))
}

async fn get_user(
    State(state): State<StoreState>,
    payload: Result<Json<GetUserRequest>, JsonRejection>,
) -> Result<Json<GetUserResponse>, ServerError> {
    let Json(req) = payload?;
    let resp = match state.users.get_user(&req.id).await {
        Some(user) => GetUserResponse { id: req.id, name: user.name, email: user.email, found: true },
        None => GetUserResponse::default(),
    };
    debug!(found = resp.found, "GetUser handled");
    Ok(Json(resp))
}

/// Build the RPC router. At most `max_concurrency` calls are in flight; the
/// rest wait for a slot.
pub fn build_router(state: StoreState, max_concurrency: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(CREATE_USER_PATH, post(create_user))
        .route(GET_USER_PATH, post(get_user))
        .with_state(state)
        .layer(GlobalConcurrencyLimitLayer::new(max_concurrency.max(1)))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx and transport-level failures
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
