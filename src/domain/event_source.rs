//! The shared event source a counter attaches to.
//!
//! The host owns exactly one source (conventionally "the document") and
//! hands it to components explicitly instead of exposing it as a global.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

use crate::domain::ui_event::{EventKind, UiEvent};

/// Callback invoked synchronously for each matching event.
pub type Listener = Arc<dyn Fn(&UiEvent) + Send + Sync>;

/// Handle returned by [`EventSource::add_listener`].
///
/// Each source decides how it numbers its listeners; ids only need to be
/// unique within one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ListenerId {
    fn from(raw: u64) -> Self {
        Self::new(raw)
    }
}

/// Something listeners can be attached to and detached from.
///
/// Implementations must be thread-safe; the host may register, dispatch,
/// and remove from different tasks.
#[cfg_attr(test, mockall::automock)]
pub trait EventSource: Send + Sync {
    /// Registers `listener` for events of `kind`.
    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId;

    /// Removes a previously registered listener.
    ///
    /// Returns `false` if `id` is unknown or was already removed.
    fn remove_listener(&self, id: ListenerId) -> bool;
}

struct Registration {
    id: ListenerId,
    kind: EventKind,
    listener: Listener,
}

/// In-process event source modelled on a browser document.
///
/// Listeners run in registration order. The listener table lock is released
/// before any listener runs, so a listener may add or remove listeners
/// (including itself) while an event is being dispatched.
pub struct Document {
    registrations: RwLock<Vec<Registration>>,
    next_id: AtomicU64,
}

impl Document {
    /// Creates a document with no listeners.
    pub fn new() -> Self {
        Self {
            registrations: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Delivers `event` to every listener registered for its kind.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, event: &UiEvent) -> usize {
        let listeners: Vec<Listener> = self
            .registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.kind == event.kind)
            .map(|r| Arc::clone(&r.listener))
            .collect();

        for listener in &listeners {
            listener(event);
        }

        debug!(kind = %event.kind, listeners = listeners.len(), "Event dispatched");
        listeners.len()
    }

    /// Number of listeners currently registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.kind == kind)
            .count()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for Document {
    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId {
        let id = ListenerId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Registration { id, kind, listener });
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let mut registrations = self
            .registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = registrations.len();
        registrations.retain(|r| r.id != id);
        registrations.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording_listener(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> Listener {
        let log = Arc::clone(log);
        Arc::new(move |_: &UiEvent| log.lock().unwrap().push(name))
    }

    #[test]
    fn test_dispatch_invokes_matching_listeners_in_order() {
        let doc = Document::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        doc.add_listener(EventKind::Click, recording_listener(&log, "first"));
        doc.add_listener(EventKind::KeyDown, recording_listener(&log, "key"));
        doc.add_listener(EventKind::Click, recording_listener(&log, "second"));

        let invoked = doc.dispatch(&UiEvent::click());

        assert_eq!(invoked, 2);
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_dispatch_without_listeners() {
        let doc = Document::new();
        assert_eq!(doc.dispatch(&UiEvent::click()), 0);
    }

    #[test]
    fn test_remove_listener() {
        let doc = Document::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let id = doc.add_listener(EventKind::Click, recording_listener(&log, "a"));
        assert_eq!(doc.listener_count(EventKind::Click), 1);

        assert!(doc.remove_listener(id));
        assert!(!doc.remove_listener(id));
        assert_eq!(doc.listener_count(EventKind::Click), 0);

        doc.dispatch(&UiEvent::click());
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_listener_id_conversions() {
        let id = ListenerId::from(42);
        assert_eq!(id, ListenerId::new(42));
        assert_eq!(id.get(), 42);
    }

    #[test]
    fn test_listener_ids_are_unique() {
        let doc = Document::new();
        let noop: Listener = Arc::new(|_: &UiEvent| {});

        let a = doc.add_listener(EventKind::Click, Arc::clone(&noop));
        let b = doc.add_listener(EventKind::Click, noop);

        assert_ne!(a, b);
    }

    #[test]
    fn test_listener_can_remove_itself_during_dispatch() {
        let doc = Arc::new(Document::new());
        let slot: Arc<Mutex<Option<ListenerId>>> = Arc::new(Mutex::new(None));

        let listener: Listener = {
            let doc = Arc::clone(&doc);
            let slot = Arc::clone(&slot);
            Arc::new(move |_: &UiEvent| {
                if let Some(id) = slot.lock().unwrap().take() {
                    doc.remove_listener(id);
                }
            })
        };
        let id = doc.add_listener(EventKind::Click, listener);
        *slot.lock().unwrap() = Some(id);

        assert_eq!(doc.dispatch(&UiEvent::click()), 1);
        assert_eq!(doc.listener_count(EventKind::Click), 0);
    }
}
