//! Types and helpers shared by the record store service and the gateway.

pub mod types;
pub mod utils;

pub use types::rpc;
