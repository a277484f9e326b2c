// Toast bus: push/dismiss pub-sub for transient notifications. The bus
// owns the auto-dismiss scheduler; consumers only render the live set and
// issue explicit dismiss calls.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use uuid::Uuid;

use ticketapp_core::models::{ToastLevel, ToastMessage};
use ticketapp_core::subscribers::{SubscriberRegistry, Subscription};

use crate::options::ToastOptions;

/// How long presenters keep a dismissed toast around for its leave
/// transition before dropping it from the rendered set. The "leaving"
/// display flag itself stays on the presentation side.
pub const EXIT_DELAY: Duration = Duration::from_millis(220);

struct LiveToast {
    toast: ToastMessage,
    timer: Option<JoinHandle<()>>,
}

struct ToastInner {
    live: Mutex<Vec<LiveToast>>,
    pushes: SubscriberRegistry<ToastMessage>,
    dismissals: SubscriberRegistry<String>,
    default_duration: Duration,
}

impl ToastInner {
    /// Remove a toast from the live set and notify dismissal subscribers.
    ///
    /// At most one dismissal event fires per id: whichever of the manual
    /// call and the auto-dismiss timer gets here first wins, the loser
    /// finds nothing to remove.
    fn dismiss(&self, id: &str) {
        let removed = {
            let mut live = self.live.lock().unwrap();
            live.iter()
                .position(|entry| entry.toast.id == id)
                .map(|index| live.remove(index))
        };
        let Some(entry) = removed else {
            return;
        };
        if let Some(timer) = entry.timer {
            timer.abort();
        }
        self.dismissals.emit(&entry.toast.id);
    }
}

impl Drop for ToastInner {
    fn drop(&mut self) {
        if let Ok(live) = self.live.get_mut() {
            for entry in live.drain(..) {
                if let Some(timer) = entry.timer {
                    timer.abort();
                }
            }
        }
    }
}

/// In-process notification bus with per-toast auto-expiry.
///
/// Cheap to clone; all clones share one live set and one scheduler. Must be
/// used inside a tokio runtime, which hosts the auto-dismiss timers.
/// Dropping the last clone aborts every pending timer.
#[derive(Clone)]
pub struct ToastBus {
    inner: Arc<ToastInner>,
}

impl Default for ToastBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToastBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastBus")
            .field("live_count", &self.inner.live.lock().unwrap().len())
            .finish()
    }
}

impl ToastBus {
    pub fn new() -> Self {
        Self::with_options(ToastOptions::default())
    }

    pub fn with_options(options: ToastOptions) -> Self {
        Self {
            inner: Arc::new(ToastInner {
                live: Mutex::new(Vec::new()),
                pushes: SubscriberRegistry::new(),
                dismissals: SubscriberRegistry::new(),
                default_duration: options.default_duration,
            }),
        }
    }

    /// Push a toast with the default visible duration.
    pub fn push(&self, message: impl Into<String>, level: ToastLevel) -> ToastMessage {
        self.push_with_duration(message, level, self.inner.default_duration)
    }

    /// Push a toast that auto-dismisses after `duration`.
    pub fn push_with_duration(
        &self,
        message: impl Into<String>,
        level: ToastLevel,
        duration: Duration,
    ) -> ToastMessage {
        let toast = ToastMessage {
            id: Uuid::new_v4().to_string(),
            level,
            message: message.into(),
            duration,
        };

        let timer = {
            let inner = Arc::downgrade(&self.inner);
            let id = toast.id.clone();
            tokio::spawn(async move {
                tokio::time::sleep(duration).await;
                if let Some(inner) = Weak::upgrade(&inner) {
                    inner.dismiss(&id);
                }
            })
        };

        self.inner.live.lock().unwrap().push(LiveToast {
            toast: toast.clone(),
            timer: Some(timer),
        });
        self.inner.pushes.emit(&toast);
        toast
    }

    /// Dismiss a toast by id. Unknown ids (including already-dismissed
    /// ones) are a no-op.
    pub fn dismiss(&self, id: &str) {
        self.inner.dismiss(id);
    }

    /// The currently visible toasts, in push order.
    pub fn active(&self) -> Vec<ToastMessage> {
        self.inner
            .live
            .lock()
            .unwrap()
            .iter()
            .map(|entry| entry.toast.clone())
            .collect()
    }

    /// Register a listener for push events. The payload is the full toast.
    pub fn subscribe_pushes(
        &self,
        listener: impl Fn(&ToastMessage) + Send + Sync + 'static,
    ) -> Subscription {
        self.inner.pushes.subscribe(listener)
    }

    /// Register a listener for dismissals. The payload is the toast id only.
    pub fn subscribe_dismissals(
        &self,
        listener: impl Fn(&String) + Send + Sync + 'static,
    ) -> Subscription {
        self.inner.dismissals.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn dismissal_counter(bus: &ToastBus) -> (Arc<AtomicUsize>, Subscription) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let sub = bus.subscribe_dismissals(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (count, sub)
    }

    #[tokio::test(start_paused = true)]
    async fn test_push_broadcasts_full_message() {
        let bus = ToastBus::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let _sub = bus.subscribe_pushes(move |toast| {
            sink.lock().unwrap().push(toast.clone());
        });

        let pushed = bus.push("Ticket created", ToastLevel::Success);
        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0], pushed);
        assert_eq!(received[0].level, ToastLevel::Success);
        assert_eq!(received[0].duration, Duration::from_millis(3200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pushed_toast_is_active_until_dismissed() {
        let bus = ToastBus::new();
        let toast = bus.push("hi", ToastLevel::Info);
        assert_eq!(bus.active().len(), 1);
        bus.dismiss(&toast.id);
        assert!(bus.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_active_preserves_push_order() {
        let bus = ToastBus::new();
        let first = bus.push("one", ToastLevel::Info);
        let second = bus.push("two", ToastLevel::Error);
        let active = bus.active();
        assert_eq!(active[0].id, first.id);
        assert_eq!(active[1].id, second.id);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_dismiss_fires_after_duration() {
        let bus = ToastBus::new();
        let (dismissals, _sub) = dismissal_counter(&bus);

        bus.push_with_duration("bye", ToastLevel::Info, Duration::from_millis(100));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(dismissals.load(Ordering::SeqCst), 0);
        assert_eq!(bus.active().len(), 1);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(dismissals.load(Ordering::SeqCst), 1);
        assert!(bus.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_dismiss_beats_timer_exactly_one_event() {
        let bus = ToastBus::new();
        let (dismissals, _sub) = dismissal_counter(&bus);

        let toast = bus.push_with_duration("raced", ToastLevel::Info, Duration::from_millis(100));
        bus.dismiss(&toast.id);
        assert_eq!(dismissals.load(Ordering::SeqCst), 1);

        // Long past the auto-dismiss deadline: the aborted timer stays quiet.
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(dismissals.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_unknown_id_is_a_no_op() {
        let bus = ToastBus::new();
        let (dismissals, _sub) = dismissal_counter(&bus);
        bus.dismiss("nope");
        assert_eq!(dismissals.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_dismiss_emits_once() {
        let bus = ToastBus::new();
        let (dismissals, _sub) = dismissal_counter(&bus);
        let toast = bus.push("once", ToastLevel::Info);
        bus.dismiss(&toast.id);
        bus.dismiss(&toast.id);
        assert_eq!(dismissals.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismissal_payload_is_the_id() {
        let bus = ToastBus::new();
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let _sub = bus.subscribe_dismissals(move |id| {
            sink.lock().unwrap().push(id.clone());
        });

        let toast = bus.push("payload", ToastLevel::Info);
        bus.dismiss(&toast.id);
        assert_eq!(received.lock().unwrap().as_slice(), &[toast.id]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clones_share_the_live_set() {
        let bus = ToastBus::new();
        let clone = bus.clone();
        let toast = bus.push("shared", ToastLevel::Info);
        assert_eq!(clone.active().len(), 1);
        clone.dismiss(&toast.id);
        assert!(bus.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_toast_gets_a_unique_id() {
        let bus = ToastBus::new();
        let a = bus.push("a", ToastLevel::Info);
        let b = bus.push("b", ToastLevel::Info);
        assert_ne!(a.id, b.id);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_the_bus_aborts_timers() {
        let bus = ToastBus::new();
        bus.push_with_duration("orphan", ToastLevel::Info, Duration::from_millis(100));
        drop(bus);
        // The timer task holds only a weak handle; advancing time past the
        // deadline must not panic or deliver anywhere.
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
}
