//! Listener registries for push updates.
//!
//! Each update category keeps its own list. Handles are unique across
//! every list in the process, so a handle can never remove a listener
//! from the wrong category by accident.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque token identifying a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

pub(crate) struct ListenerList<T> {
    entries: Mutex<Vec<(u64, Callback<T>)>>,
}

impl<T> Default for ListenerList<T> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl<T> ListenerList<T> {
    pub fn add(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> ListenerHandle {
        let id = NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed);
        self.entries.lock().push((id, Arc::new(listener)));
        ListenerHandle(id)
    }

    pub fn remove(&self, handle: ListenerHandle) -> bool {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|(id, _)| *id != handle.0);
        entries.len() != before
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Deliver `value` to every listener registered at the start of the
    /// call, in registration order. The lock is never held across a
    /// callback, so listeners may add or remove listeners (including
    /// themselves) without deadlocking; a listener removed mid-delivery
    /// is skipped when its turn comes.
    pub fn notify(&self, value: &T) {
        let ids: Vec<u64> = self.entries.lock().iter().map(|(id, _)| *id).collect();
        for id in ids {
            let callback = self
                .entries
                .lock()
                .iter()
                .find(|(entry, _)| *entry == id)
                .map(|(_, callback)| callback.clone());
            if let Some(callback) = callback {
                callback(value);
            }
        }
    }
}
