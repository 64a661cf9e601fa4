//! Service layer owning the in-memory user table.
//! - `storage` holds the generic synchronized map.
//! - `user_service` implements the create/get semantics on top of it.

pub mod storage;
pub mod user_service;

pub use user_service::{CreateOutcome, UserRecord, UserService};
