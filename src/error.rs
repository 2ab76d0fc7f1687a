//! Error types for Haven.
//!
//! None of these ever reach a caller of the classification, dispatch, or
//! lookup operations. Catalog failures are reported once, at construction,
//! through [`crate::resources::LoadReport`]; configuration failures stop the
//! adapter binary before anything is loaded.

use crate::resources::ResourceKind;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Failure to load one resource collection.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("No {kind} collection at {location}")]
    Missing {
        kind: ResourceKind,
        location: String,
    },

    #[error("Failed to read {kind} collection from {location}: {reason}")]
    Read {
        kind: ResourceKind,
        location: String,
        reason: String,
    },

    #[error("Malformed {kind} collection: {reason}")]
    Parse { kind: ResourceKind, reason: String },
}

impl CatalogError {
    /// The resource kind this failure belongs to.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Missing { kind, .. } | Self::Read { kind, .. } | Self::Parse { kind, .. } => {
                *kind
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
