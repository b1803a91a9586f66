//! Subscriber lists shared by the environment sources and the resolver

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Id for sources that never emit
    pub(crate) const INERT: SubscriptionId = SubscriptionId(0);
}

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

pub(crate) struct Listeners<T> {
    next_id: AtomicU64,
    entries: Mutex<Vec<(SubscriptionId, Callback<T>)>>,
}

impl<T: Copy> Listeners<T> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            entries: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn add(&self, listener: Box<dyn Fn(T) + Send + Sync>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, Arc::from(listener)));
        id
    }

    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    /// Call every listener with `value`
    ///
    /// Runs on a snapshot, so listeners may subscribe or unsubscribe while
    /// being notified.
    pub(crate) fn notify(&self, value: T) {
        let snapshot: Vec<Callback<T>> = self.lock().iter().map(|(_, cb)| cb.clone()).collect();
        for callback in snapshot {
            callback(value);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, Callback<T>)>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_add_notify_remove() {
        let listeners = Listeners::<u8>::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        let id = listeners.add(Box::new(move |v| {
            counter.fetch_add(v as usize, Ordering::SeqCst);
        }));

        listeners.notify(2);
        assert_eq!(hits.load(Ordering::SeqCst), 2);

        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));
        listeners.notify(5);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(listeners.len(), 0);
    }

    #[test]
    fn test_listener_may_unsubscribe_itself() {
        let listeners = Arc::new(Listeners::<bool>::new());
        let slot: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));

        let inner = listeners.clone();
        let inner_slot = slot.clone();
        let id = listeners.add(Box::new(move |_| {
            if let Some(id) = *inner_slot.lock().unwrap() {
                inner.remove(id);
            }
        }));
        *slot.lock().unwrap() = Some(id);

        listeners.notify(true);
        assert_eq!(listeners.len(), 0);
    }
}
