//! Storage abstraction for persistence.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::library::LibraryState;
use crate::project::ProjectData;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Project not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for project storage backends.
///
/// Projects are stored by id. The furniture library's user templates and
/// recency list are stored once, next to the projects.
pub trait Storage: Send + Sync {
    /// Save a project.
    fn save(&self, id: &str, project: &ProjectData) -> StorageResult<()>;

    /// Load a project.
    fn load(&self, id: &str) -> StorageResult<ProjectData>;

    /// Delete a project. Deleting a missing project is not an error.
    fn delete(&self, id: &str) -> StorageResult<()>;

    /// List all project IDs.
    fn list(&self) -> StorageResult<Vec<String>>;

    /// Check if a project exists.
    fn exists(&self, id: &str) -> StorageResult<bool>;

    /// Save the persisted part of the furniture library.
    fn save_library(&self, state: &LibraryState) -> StorageResult<()>;

    /// Load the furniture library, `None` if it was never saved.
    fn load_library(&self) -> StorageResult<Option<LibraryState>>;
}
