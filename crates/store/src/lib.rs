//! Persistence gateway for the garden document.
//!
//! - [`DocumentStore`]: the backend contract: load and replace one JSON
//!   document.
//! - [`JsonFileStore`]: backend writing a single file with atomic rename.
//! - [`MemoryStore`]: in-process backend for tests and ephemeral runs.
//! - [`GardenStore`]: versioned envelope and [`Garden`] codec on top of a
//!   backend.
//!
//! [`Garden`]: microgreens_core::garden::Garden

pub mod document;
pub mod file;
pub mod garden_store;
pub mod memory;

pub use document::{DocumentStore, StoreError};
pub use file::JsonFileStore;
pub use garden_store::{GardenStore, STORAGE_KEY, STORAGE_VERSION};
pub use memory::MemoryStore;
