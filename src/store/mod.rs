//! Draft persistence: storage backends and the debounced draft store

mod backend;
mod draft;

pub use backend::{JsonFileBackend, MemoryBackend, StorageBackend};
pub use draft::{DraftSnapshot, DraftStore};

#[cfg(test)]
pub use backend::MockStorageBackend;
