//! Record store service: serves the user call contract over JSON RPC.

pub mod errors;
pub mod routes;
pub mod startup;

pub use startup::{run, serve};
