//! Named project persistence.

use crate::error::StorageError;
use chrono::{DateTime, Utc};
use orion_core::{random_suffix, Node};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A saved snapshot of a schema tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProject {
    pub id: String,
    pub name: String,
    pub schema: Node,
    /// Save time in epoch milliseconds.
    #[serde(alias = "updatedAt")]
    pub saved_at: i64,
}

impl SavedProject {
    /// Snapshot `schema` under `name` with a fresh `proj_` id.
    pub fn new(name: impl Into<String>, schema: &Node) -> Self {
        Self {
            id: format!("proj_{}", random_suffix()),
            name: name.into(),
            schema: schema.clone(),
            saved_at: Utc::now().timestamp_millis(),
        }
    }

    pub fn saved_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.saved_at)
    }
}

/// Durable storage for saved projects.
pub trait ProjectStore {
    /// Save `schema` as a new project.
    fn save_project(&mut self, name: &str, schema: &Node) -> Result<SavedProject, StorageError>;

    /// Every saved project, oldest first.
    fn list_projects(&self) -> Result<Vec<SavedProject>, StorageError>;

    fn load_project(&self, id: &str) -> Result<Option<SavedProject>, StorageError> {
        Ok(self.list_projects()?.into_iter().find(|project| project.id == id))
    }
}

/// Projects kept in memory for the lifetime of the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    projects: Vec<SavedProject>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStore for MemoryStore {
    fn save_project(&mut self, name: &str, schema: &Node) -> Result<SavedProject, StorageError> {
        let project = SavedProject::new(name, schema);
        self.projects.push(project.clone());
        Ok(project)
    }

    fn list_projects(&self) -> Result<Vec<SavedProject>, StorageError> {
        Ok(self.projects.clone())
    }
}

/// Projects stored as one JSON array in a file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<SavedProject>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write(&self, projects: &[SavedProject]) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let raw = serde_json::to_string_pretty(projects)?;
        fs::write(&self.path, raw).map_err(io_err)
    }
}

impl ProjectStore for JsonFileStore {
    fn save_project(&mut self, name: &str, schema: &Node) -> Result<SavedProject, StorageError> {
        let mut projects = self.read()?;
        let project = SavedProject::new(name, schema);
        projects.push(project.clone());
        self.write(&projects)?;
        tracing::info!(id = %project.id, name, path = %self.path.display(), "saved project");
        Ok(project)
    }

    fn list_projects(&self) -> Result<Vec<SavedProject>, StorageError> {
        self.read()
    }
}
