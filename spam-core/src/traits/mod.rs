//! Backend and storage abstraction trait definition

mod backend;
mod storage;

pub use backend::Backend;
pub use storage::{InMemoryStore, KeyValueStore};
