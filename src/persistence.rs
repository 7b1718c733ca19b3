use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::Layout;

/// Errors that can occur while saving or loading layout files.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize layout: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write layout: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to read layout file: {0}")]
    Read(String),
}

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// On-disk representation of a saved layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutFile {
    pub layout: Layout,
    /// Application version that wrote the file.
    pub version: String,
}

/// Named JSON layout files in a single directory. One file per name,
/// human-readable, so saved layouts can be inspected and diffed.
#[derive(Debug, Clone)]
pub struct LayoutStore {
    dir: PathBuf,
}

impl LayoutStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Saves `layout` under `name`, creating the store directory if
    /// needed and overwriting any previous file of that name.
    pub fn save(&self, name: &str, layout: &Layout) -> PersistenceResult<()> {
        fs::create_dir_all(&self.dir)?;

        let file = LayoutFile {
            layout: layout.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(self.path_for(name), json)?;

        Ok(())
    }

    /// Loads the layout saved under `name`.
    pub fn load(&self, name: &str) -> PersistenceResult<Layout> {
        let path = self.path_for(name);
        let json =
            fs::read_to_string(&path).map_err(|e| PersistenceError::Read(e.to_string()))?;
        let file: LayoutFile = serde_json::from_str(&json)?;

        if file.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Layout '{}' was saved by version {}, current is {}",
                name,
                file.version,
                env!("CARGO_PKG_VERSION")
            );
        }

        Ok(file.layout)
    }

    /// Names of all saved layouts, sorted.
    pub fn list(&self) -> PersistenceResult<Vec<String>> {
        if !Path::new(&self.dir).exists() {
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    path.file_stem()
                        .map(|stem| stem.to_string_lossy().into_owned())
                } else {
                    None
                }
            })
            .collect();
        names.sort();

        Ok(names)
    }
}
