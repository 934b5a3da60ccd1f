//! Storage layer: the durable key-value boundary.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait abstraction for backend implementations
//! - `json`: JSON file-based implementation with atomic writes
//! - `memory`: in-memory implementation

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use json::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
