//! Background save thread.

use super::{DocumentFile, Storage, StorageError, StorageResult, rotate_backups};
use crate::dispatch::{DispatchHandle, EditorEvent};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Why a save was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePurpose {
    /// Explicit save of the user's document.
    Document,
    /// Autosave backup; older backups beyond `keep` are pruned afterwards.
    Backup { keep: usize },
}

/// Write `document` on a worker thread and post the outcome to the UI thread.
///
/// The document is an owned snapshot, so edits made while the save runs are
/// not part of it.
pub fn spawn_save(
    storage: Arc<dyn Storage>,
    key: String,
    document: DocumentFile,
    purpose: SavePurpose,
    handle: DispatchHandle,
) -> StorageResult<JoinHandle<()>> {
    thread::Builder::new()
        .name("flowdraft-save".to_string())
        .spawn(move || {
            log::info!("saving {} ({} shapes)", key, document.shapes.len());
            let result = pollster::block_on(storage.save(&key, &document));
            match &result {
                Ok(()) => log::info!("saved {}", key),
                Err(e) => log::error!("save of {} failed: {}", key, e),
            }

            if let (Ok(()), SavePurpose::Backup { keep }) = (&result, purpose) {
                match pollster::block_on(rotate_backups(storage.as_ref(), keep)) {
                    Ok(removed) => {
                        for old in removed {
                            log::info!("removed old backup {}", old);
                        }
                    }
                    Err(e) => log::warn!("backup rotation failed: {}", e),
                }
            }

            handle.post(EditorEvent::SaveFinished {
                key,
                purpose,
                result,
            });
        })
        .map_err(|e| StorageError::Io(format!("Failed to start save thread: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Dispatcher;
    use crate::storage::MemoryStorage;
    use pollster::block_on;

    #[test]
    fn test_save_posts_completion() {
        let storage = Arc::new(MemoryStorage::new());
        let dispatcher = Dispatcher::new();
        spawn_save(
            storage.clone(),
            "doc".to_string(),
            DocumentFile::default(),
            SavePurpose::Document,
            dispatcher.handle(),
        )
        .unwrap()
        .join()
        .unwrap();

        assert_eq!(
            dispatcher.drain(),
            vec![EditorEvent::SaveFinished {
                key: "doc".to_string(),
                purpose: SavePurpose::Document,
                result: Ok(()),
            }]
        );
        assert!(block_on(storage.exists("doc")).unwrap());
    }

    #[test]
    fn test_backup_save_rotates() {
        let storage = Arc::new(MemoryStorage::new());
        for key in ["backup-20240101-000000-000", "backup-20240102-000000-000"] {
            block_on(storage.save(key, &DocumentFile::default())).unwrap();
        }
        let dispatcher = Dispatcher::new();
        spawn_save(
            storage.clone(),
            "backup-20240103-000000-000".to_string(),
            DocumentFile::default(),
            SavePurpose::Backup { keep: 2 },
            dispatcher.handle(),
        )
        .unwrap()
        .join()
        .unwrap();

        assert_eq!(
            block_on(storage.list()).unwrap(),
            vec!["backup-20240102-000000-000", "backup-20240103-000000-000"]
        );
    }
}
