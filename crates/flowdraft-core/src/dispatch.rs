//! Marshaling background completions onto the UI thread.
//!
//! Worker threads never touch the graph. They post an [`EditorEvent`] through a
//! [`DispatchHandle`]; the host drains them on the UI thread with
//! `Editor::poll_events`.

use crate::storage::{SavePurpose, StorageResult};
use std::fmt;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::time::Duration;

/// Event posted from a background thread.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// A background save finished.
    SaveFinished {
        key: String,
        purpose: SavePurpose,
        result: StorageResult<()>,
    },
    /// The autosave timer fired.
    AutosaveTick,
}

/// Callback that nudges the host event loop after a post.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// Cloneable sending side, handed to worker threads.
#[derive(Clone)]
pub struct DispatchHandle {
    tx: Sender<EditorEvent>,
    waker: Option<Waker>,
}

impl DispatchHandle {
    /// Queue an event for the UI thread. Returns false once the UI side is gone.
    pub fn post(&self, event: EditorEvent) -> bool {
        if self.tx.send(event).is_err() {
            log::debug!("dispatcher closed, dropping event");
            return false;
        }
        if let Some(waker) = &self.waker {
            waker();
        }
        true
    }
}

impl fmt::Debug for DispatchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchHandle")
            .field("has_waker", &self.waker.is_some())
            .finish()
    }
}

/// UI-side receiver.
pub struct Dispatcher {
    tx: Sender<EditorEvent>,
    rx: Receiver<EditorEvent>,
    waker: Option<Waker>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx, waker: None }
    }

    /// Dispatcher whose handles call `waker` after each post.
    pub fn with_waker(waker: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            waker: Some(Arc::new(waker)),
            ..Self::new()
        }
    }

    pub fn handle(&self) -> DispatchHandle {
        DispatchHandle {
            tx: self.tx.clone(),
            waker: self.waker.clone(),
        }
    }

    /// Take every event queued so far without blocking.
    pub fn drain(&self) -> Vec<EditorEvent> {
        self.rx.try_iter().collect()
    }

    /// Block until an event arrives or `timeout` passes.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<EditorEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("has_waker", &self.waker.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_events_cross_threads_in_order() {
        let dispatcher = Dispatcher::new();
        let handle = dispatcher.handle();
        thread::spawn(move || {
            handle.post(EditorEvent::AutosaveTick);
            handle.post(EditorEvent::SaveFinished {
                key: "doc".to_string(),
                purpose: SavePurpose::Document,
                result: Ok(()),
            });
        })
        .join()
        .unwrap();

        let events = dispatcher.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], EditorEvent::AutosaveTick);
        assert!(dispatcher.drain().is_empty());
    }

    #[test]
    fn test_waker_runs_per_post() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let dispatcher = Dispatcher::with_waker(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        let handle = dispatcher.handle();
        handle.post(EditorEvent::AutosaveTick);
        handle.post(EditorEvent::AutosaveTick);
        assert_eq!(count.load(Ordering::SeqCst), 2);
        assert_eq!(
            dispatcher.wait_timeout(Duration::from_millis(10)),
            Some(EditorEvent::AutosaveTick)
        );
    }

    #[test]
    fn test_post_after_drop_reports_closed() {
        let handle = Dispatcher::new().handle();
        assert!(!handle.post(EditorEvent::AutosaveTick));
    }
}
