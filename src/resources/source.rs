//! Where resource collections are read from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::CatalogError;
use crate::resources::ResourceKind;

/// Maximum size of a single collection file (1 MiB).
const MAX_COLLECTION_FILE_SIZE: u64 = 1024 * 1024;

/// A read-only store of the four named resource collections.
///
/// Each call returns the raw JSON text of one collection. Implementations
/// report an absent collection as [`CatalogError::Missing`] so the catalog
/// can tell "not provided" apart from "provided but broken".
pub trait ResourceSource {
    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    fn read(&self, kind: ResourceKind) -> Result<String, CatalogError>;
}

/// Reads `<root>/<collection>.json`, e.g. `resources/helplines.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, kind: ResourceKind) -> PathBuf {
        self.root.join(format!("{}.json", kind.collection()))
    }
}

impl ResourceSource for DirectorySource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn read(&self, kind: ResourceKind) -> Result<String, CatalogError> {
        let path = self.path_for(kind);
        let location = path.display().to_string();

        let meta = match std::fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CatalogError::Missing { kind, location });
            }
            Err(e) => {
                return Err(CatalogError::Read {
                    kind,
                    location,
                    reason: e.to_string(),
                });
            }
        };

        if !meta.is_file() {
            return Err(CatalogError::Read {
                kind,
                location,
                reason: "not a regular file".to_string(),
            });
        }
        if meta.len() > MAX_COLLECTION_FILE_SIZE {
            return Err(CatalogError::Read {
                kind,
                location,
                reason: format!(
                    "{} bytes exceeds the {} byte limit",
                    meta.len(),
                    MAX_COLLECTION_FILE_SIZE
                ),
            });
        }

        std::fs::read_to_string(&path).map_err(|e| CatalogError::Read {
            kind,
            location,
            reason: e.to_string(),
        })
    }
}

/// In-memory collections, keyed by kind. Kinds never inserted read as missing.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    collections: HashMap<ResourceKind, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, kind: ResourceKind, json: impl Into<String>) -> Self {
        self.collections.insert(kind, json.into());
        self
    }
}

impl ResourceSource for MemorySource {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn read(&self, kind: ResourceKind) -> Result<String, CatalogError> {
        self.collections
            .get(&kind)
            .cloned()
            .ok_or_else(|| CatalogError::Missing {
                kind,
                location: "memory".to_string(),
            })
    }
}
