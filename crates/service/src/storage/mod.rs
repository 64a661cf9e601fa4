//! Storage abstractions for the service layer
//!
//! In-memory keyed maps shared across request handlers.

pub mod memory_map_store;
