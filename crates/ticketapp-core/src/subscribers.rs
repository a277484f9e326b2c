// Observer registry. Each store owns one (or two, for the toast bus) and
// delivers broadcasts synchronously, in registration order, at the point
// the mutating call resolves.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Slot<T> {
    id: u64,
    callback: Callback<T>,
}

/// A list of callbacks with explicit unsubscribe tokens.
///
/// Listeners registered during an `emit` do not receive that emission;
/// listeners unsubscribed during an `emit` may still receive it. No
/// ordering guarantee exists between listeners beyond registration order.
pub struct SubscriberRegistry<T> {
    slots: Arc<Mutex<Vec<Slot<T>>>>,
    next_id: AtomicU64,
}

impl<T> Default for SubscriberRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for SubscriberRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("subscriber_count", &self.len())
            .finish()
    }
}

impl<T> SubscriberRegistry<T> {
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(1),
        }
    }

    /// Register a listener. The returned [`Subscription`] is the only way
    /// to deregister it; dropping the handle leaves the listener in place,
    /// matching the explicit-cancellation model of the stores.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription
    where
        T: 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.slots.lock().unwrap().push(Slot {
            id,
            callback: Arc::new(listener),
        });

        let slots = Arc::downgrade(&self.slots);
        Subscription::new(move || {
            if let Some(slots) = Weak::upgrade(&slots) {
                slots.lock().unwrap().retain(|slot| slot.id != id);
            }
        })
    }

    /// Invoke every current listener with `payload`, in registration order.
    ///
    /// Callbacks run outside the registry lock, so a listener may subscribe
    /// or unsubscribe reentrantly without deadlocking.
    pub fn emit(&self, payload: &T) {
        let callbacks: Vec<Callback<T>> = self
            .slots
            .lock()
            .unwrap()
            .iter()
            .map(|slot| Arc::clone(&slot.callback))
            .collect();
        for callback in callbacks {
            callback(payload);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().unwrap().is_empty()
    }
}

/// Deregistration handle returned by [`SubscriberRegistry::subscribe`].
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Remove the listener. Idempotent once consumed; the registry outliving
    /// the handle is not required.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
