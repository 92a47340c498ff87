//! File-based storage implementation for native platforms.

use super::{Storage, StorageError, StorageResult};
use crate::library::LibraryState;
use crate::project::ProjectData;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the furniture library, kept beside the projects folder.
const LIBRARY_FILE: &str = "library.json";

/// File-based storage for native platforms.
///
/// Projects are JSON files in `<base>/projects/`; the furniture library
/// lives in `<base>/library.json`.
pub struct FileStorage {
    /// Base directory for storage.
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directories if they don't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        let storage = Self { base_path };
        let projects = storage.projects_dir();
        if !projects.exists() {
            fs::create_dir_all(&projects).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(storage)
    }

    /// Create file storage in the default location.
    ///
    /// On Linux: `~/.local/share/planscale/`
    /// On Windows: `%LOCALAPPDATA%\planscale\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("planscale"))
    }

    fn projects_dir(&self) -> PathBuf {
        self.base_path.join("projects")
    }

    /// Get the file path for a project ID.
    fn project_path(&self, id: &str) -> PathBuf {
        // Sanitize ID to be safe for filenames
        let safe_id: String = id
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.projects_dir().join(format!("{}.json", safe_id))
    }

    fn library_path(&self) -> PathBuf {
        self.base_path.join(LIBRARY_FILE)
    }

    /// Get the base path.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

fn read(path: &Path) -> StorageResult<String> {
    fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

fn write(path: &Path, contents: &str) -> StorageResult<()> {
    fs::write(path, contents)
        .map_err(|e| StorageError::Io(format!("Failed to write {}: {}", path.display(), e)))
}

impl Storage for FileStorage {
    fn save(&self, id: &str, project: &ProjectData) -> StorageResult<()> {
        let json = project
            .to_json()
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        write(&self.project_path(id), &json)?;
        log::debug!("Saved project {}", id);
        Ok(())
    }

    fn load(&self, id: &str) -> StorageResult<ProjectData> {
        let path = self.project_path(id);
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }

        let json = read(&path)?;
        ProjectData::from_json(&json).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    fn delete(&self, id: &str) -> StorageResult<()> {
        let path = self.project_path(id);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    fn list(&self) -> StorageResult<Vec<String>> {
        let dir = self.projects_dir();
        if !dir.exists() {
            return Ok(vec![]);
        }

        let entries = fs::read_dir(&dir)
            .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

        let mut ids = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Some(name) = path.file_stem().and_then(|n| n.to_str()) {
                    ids.push(name.to_string());
                }
            }
        }
        Ok(ids)
    }

    fn exists(&self, id: &str) -> StorageResult<bool> {
        Ok(self.project_path(id).exists())
    }

    fn save_library(&self, state: &LibraryState) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        write(&self.library_path(), &json)
    }

    fn load_library(&self) -> StorageResult<Option<LibraryState>> {
        let path = self.library_path();
        if !path.exists() {
            return Ok(None);
        }
        let json = read(&path)?;
        serde_json::from_str(&json).map(Some).map_err(|e| {
            StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}
