//! HTTP/JSON gateway in front of the record store service.
//!
//! Each inbound request becomes exactly one store call; call outcomes are
//! translated into status codes by [`errors::GatewayError`].

pub mod bootstrap;
pub mod client;
pub mod errors;
pub mod routes;

pub use client::{CallError, HttpUserStoreClient, UserStoreClient};
pub use errors::GatewayError;
