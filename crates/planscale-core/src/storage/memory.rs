//! In-memory storage implementation.

use super::{Storage, StorageError, StorageResult};
use crate::library::LibraryState;
use crate::project::ProjectData;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

fn lock_error<T>(e: PoisonError<T>) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    projects: RwLock<HashMap<String, ProjectData>>,
    library: RwLock<Option<LibraryState>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, project: &ProjectData) -> StorageResult<()> {
        let mut projects = self.projects.write().map_err(lock_error)?;
        projects.insert(id.to_string(), project.clone());
        Ok(())
    }

    fn load(&self, id: &str) -> StorageResult<ProjectData> {
        let projects = self.projects.read().map_err(lock_error)?;
        projects
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(id.to_string()))
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let mut projects = self.projects.write().map_err(lock_error)?;
        projects.remove(id);
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let projects = self.projects.read().map_err(lock_error)?;
        Ok(projects.keys().cloned().collect())
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        let projects = self.projects.read().map_err(lock_error)?;
        Ok(projects.contains_key(id))
    }

    fn save_library(&self, state: &LibraryState) -> StorageResult<()> {
        let mut library = self.library.write().map_err(lock_error)?;
        *library = Some(state.clone());
        Ok(())
    }

    fn load_library(&self) -> StorageResult<Option<LibraryState>> {
        let library = self.library.read().map_err(lock_error)?;
        Ok(library.clone())
    }
}
