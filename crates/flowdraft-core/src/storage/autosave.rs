//! Periodic backups.
//!
//! A timer thread posts [`EditorEvent::AutosaveTick`] to the UI thread. On each
//! tick the editor asks [`AutoSaveManager`] whether a backup is due and, if so,
//! starts a background save under a timestamped key.

use super::{Storage, StorageError, StorageResult};
use crate::dispatch::{DispatchHandle, EditorEvent};
use chrono::{DateTime, Local};
use std::sync::Arc;
use std::sync::mpsc::{RecvTimeoutError, Sender, channel};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Prefix shared by every backup key.
pub const BACKUP_PREFIX: &str = "backup-";

/// Backup key for `now`: `backup-YYYYMMDD-HHMMSS-mmm`. Sorts chronologically.
pub fn backup_key(now: DateTime<Local>) -> String {
    format!("{}{}", BACKUP_PREFIX, now.format("%Y%m%d-%H%M%S-%3f"))
}

/// Backup keys in `storage`, oldest first.
async fn backup_keys(storage: &dyn Storage) -> StorageResult<Vec<String>> {
    let mut keys: Vec<String> = storage
        .list()
        .await?
        .into_iter()
        .filter(|key| key.starts_with(BACKUP_PREFIX))
        .collect();
    keys.sort();
    Ok(keys)
}

/// Delete all but the newest `keep` backups. Returns the deleted keys.
pub async fn rotate_backups(storage: &dyn Storage, keep: usize) -> StorageResult<Vec<String>> {
    let keys = backup_keys(storage).await?;
    let excess = keys.len().saturating_sub(keep);
    let doomed: Vec<String> = keys.into_iter().take(excess).collect();
    for key in &doomed {
        storage.delete(key).await?;
    }
    Ok(doomed)
}

/// Key of the newest backup, if any.
pub async fn latest_backup(storage: &dyn Storage) -> StorageResult<Option<String>> {
    Ok(backup_keys(storage).await?.pop())
}

/// Decides when a backup is due.
///
/// Tracks the graph revision written by the last successful backup so ticks
/// with nothing new to save are skipped.
pub struct AutoSaveManager {
    storage: Arc<dyn Storage>,
    keep: usize,
    saved_revision: u64,
    in_flight: Option<u64>,
}

impl AutoSaveManager {
    /// `revision` is the graph revision already considered safe.
    pub fn new(storage: Arc<dyn Storage>, keep: usize, revision: u64) -> Self {
        Self {
            storage,
            keep,
            saved_revision: revision,
            in_flight: None,
        }
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Number of backups kept after rotation.
    pub fn keep(&self) -> usize {
        self.keep
    }

    /// Whether the graph changed since the last successful backup.
    pub fn is_dirty(&self, revision: u64) -> bool {
        revision != self.saved_revision
    }

    /// A backup is due when nothing is being saved and the graph changed.
    pub fn should_save(&self, revision: u64, saving: bool) -> bool {
        !saving && self.in_flight.is_none() && self.is_dirty(revision)
    }

    /// Record that a backup of `revision` has started.
    pub fn begin(&mut self, revision: u64) {
        self.in_flight = Some(revision);
    }

    /// Record the outcome of the backup started by [`AutoSaveManager::begin`].
    pub fn finish(&mut self, success: bool) {
        if let Some(revision) = self.in_flight.take() {
            if success {
                self.saved_revision = revision;
            }
        }
    }
}

/// Timer thread posting autosave ticks. Dropping it stops the thread.
pub struct AutoSaveScheduler {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl AutoSaveScheduler {
    pub fn start(interval: Duration, handle: DispatchHandle) -> StorageResult<Self> {
        let (stop_tx, stop_rx) = channel::<()>();
        let thread = thread::Builder::new()
            .name("flowdraft-autosave".to_string())
            .spawn(move || {
                log::debug!("autosave timer started, every {:?}", interval);
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            if !handle.post(EditorEvent::AutosaveTick) {
                                break;
                            }
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                log::debug!("autosave timer stopped");
            })
            .map_err(|e| StorageError::Io(format!("Failed to start autosave timer: {}", e)))?;
        Ok(Self {
            stop: Some(stop_tx),
            thread: Some(thread),
        })
    }
}

impl Drop for AutoSaveScheduler {
    fn drop(&mut self) {
        // Closing the channel wakes the timer thread.
        self.stop.take();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Dispatcher;
    use crate::storage::{DocumentFile, MemoryStorage};
    use chrono::TimeZone;
    use pollster::block_on;

    #[test]
    fn test_backup_key_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap()
            + chrono::Duration::milliseconds(42);
        assert_eq!(backup_key(at), "backup-20240309-070501-042");
    }

    #[test]
    fn test_rotation_keeps_newest() {
        let storage = MemoryStorage::new();
        for day in 1..=7 {
            let key = format!("backup-202401{:02}-120000-000", day);
            block_on(storage.save(&key, &DocumentFile::default())).unwrap();
        }
        block_on(storage.save("chart", &DocumentFile::default())).unwrap();

        let removed = block_on(rotate_backups(&storage, 5)).unwrap();
        assert_eq!(removed, vec!["backup-20240101-120000-000", "backup-20240102-120000-000"]);
        assert_eq!(block_on(storage.list()).unwrap().len(), 6);
        assert_eq!(
            block_on(latest_backup(&storage)).unwrap().as_deref(),
            Some("backup-20240107-120000-000")
        );
    }

    #[test]
    fn test_manager_skips_when_clean_or_busy() {
        let mut manager = AutoSaveManager::new(Arc::new(MemoryStorage::new()), 5, 10);
        assert!(!manager.should_save(10, false));
        assert!(manager.should_save(11, false));
        assert!(!manager.should_save(11, true));

        manager.begin(11);
        assert!(!manager.should_save(12, false));
        manager.finish(false);
        assert!(manager.should_save(11, false));

        manager.begin(11);
        manager.finish(true);
        assert!(!manager.should_save(11, false));
        assert!(manager.should_save(12, false));
    }

    #[test]
    fn test_scheduler_ticks_until_dropped() {
        let dispatcher = Dispatcher::new();
        let scheduler = AutoSaveScheduler::start(Duration::from_millis(5), dispatcher.handle()).unwrap();
        assert_eq!(
            dispatcher.wait_timeout(Duration::from_secs(5)),
            Some(EditorEvent::AutosaveTick)
        );
        drop(scheduler);
        dispatcher.drain();
        assert_eq!(dispatcher.wait_timeout(Duration::from_millis(50)), None);
    }
}
