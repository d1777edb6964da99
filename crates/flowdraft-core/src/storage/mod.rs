//! Storage abstraction for persistence.

mod autosave;
mod codec;
mod file;
mod memory;
mod worker;

pub use autosave::{
    AutoSaveManager, AutoSaveScheduler, BACKUP_PREFIX, backup_key, latest_backup, rotate_backups,
};
pub use codec::{DocumentFile, FORMAT_VERSION, LineRecord, ShapeRecord};
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use worker::{SavePurpose, spawn_save};

use crate::shapes::ShapeError;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Unknown shape kind: {0}")]
    UnknownKind(String),
    #[error("Storage error: {0}")]
    Other(String),
}

impl From<ShapeError> for StorageError {
    fn from(err: ShapeError) -> Self {
        match err {
            ShapeError::UnknownKind(kind) => StorageError::UnknownKind(kind),
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for document storage backends.
///
/// Keys name documents within a backend (a file stem for [`FileStorage`]).
/// Implementations must be `Send + Sync` so saves can run on a worker thread.
pub trait Storage: Send + Sync {
    /// Save a document.
    fn save(&self, key: &str, document: &DocumentFile) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a document.
    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<DocumentFile>>;

    /// Delete a document. Missing keys are not an error.
    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all document keys.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a document exists.
    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>>;
}
