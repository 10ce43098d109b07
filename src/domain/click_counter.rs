//! Click counter with a one-way `active -> destroyed` lifecycle.
//!
//! A [`ClickCounter`] attaches a single `click` listener to an injected
//! [`EventSource`] and tallies every click it observes. Once destroyed, the
//! listener is detached and [`ClickCounter::get_clicks`] reports
//! [`ClickCount::Destroyed`] forever.
//!
//! # Usage Flow
//!
//! 1. The host builds the counter with [`ClickCounter::create`]
//! 2. Each dispatched click increments the tally and notifies the [`ClickSink`]
//! 3. Callers read the tally with [`ClickCounter::get_clicks`]
//! 4. [`ClickCounter::destroy`] tears the listener down

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::debug;

use crate::domain::event_source::{EventSource, Listener, ListenerId};
use crate::domain::ui_event::{EventKind, UiEvent};
use crate::infrastructure::diagnostics::ClickSink;

/// Message reported in place of a count once the counter is destroyed.
pub const DESTROYED_MESSAGE: &str = "Analytics has been destroyed";

/// Result of [`ClickCounter::get_clicks`].
///
/// Callers must discriminate between the two shapes before treating the
/// value as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickCount {
    Active(u64),
    Destroyed,
}

impl ClickCount {
    /// Returns the tally while active, `None` once destroyed.
    pub fn active(self) -> Option<u64> {
        match self {
            Self::Active(n) => Some(n),
            Self::Destroyed => None,
        }
    }

    pub fn is_destroyed(self) -> bool {
        matches!(self, Self::Destroyed)
    }
}

impl fmt::Display for ClickCount {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Active(n) => write!(f, "{}", n),
            Self::Destroyed => f.write_str(DESTROYED_MESSAGE),
        }
    }
}

/// Serializes as a bare number while active and as [`DESTROYED_MESSAGE`]
/// afterwards.
impl Serialize for ClickCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Active(n) => serializer.serialize_u64(*n),
            Self::Destroyed => serializer.serialize_str(DESTROYED_MESSAGE),
        }
    }
}

/// State shared between the counter handle and its listener.
///
/// `count` has a single writer (the listener). `destroyed` only ever goes
/// from `false` to `true`.
struct CounterState {
    count: AtomicU64,
    destroyed: AtomicBool,
    sink: Arc<dyn ClickSink>,
}

impl CounterState {
    fn on_click(&self) {
        // A dispatch that snapshotted its listeners before `destroy` may still
        // reach us; it must not count.
        if self.destroyed.load(Ordering::Acquire) {
            return;
        }

        let count = self.count.fetch_add(1, Ordering::AcqRel) + 1;
        metrics::counter!("analytics_clicks_total").increment(1);
        self.sink.record(count);
    }
}

/// Counts clicks observed on a shared event source.
///
/// Dropping a counter that was never destroyed detaches its listener, so an
/// unreachable counter does not keep counting on the source.
pub struct ClickCounter {
    state: Arc<CounterState>,
    source: Arc<dyn EventSource>,
    listener_id: ListenerId,
}

impl ClickCounter {
    /// Attaches a new counter to `source`.
    ///
    /// Registers exactly one `click` listener. The tally starts at zero and
    /// every click is reported to `sink` with the post-increment count.
    pub fn create(source: Arc<dyn EventSource>, sink: Arc<dyn ClickSink>) -> Self {
        let state = Arc::new(CounterState {
            count: AtomicU64::new(0),
            destroyed: AtomicBool::new(false),
            sink,
        });

        let listener: Listener = {
            let state = Arc::clone(&state);
            Arc::new(move |_event: &UiEvent| state.on_click())
        };
        let listener_id = source.add_listener(EventKind::Click, listener);
        debug!(?listener_id, "Click counter attached");

        Self {
            state,
            source,
            listener_id,
        }
    }

    /// Tears the counter down.
    ///
    /// Marks the counter destroyed and detaches its listener so later clicks
    /// are not counted. Calling it again has no further effect.
    pub fn destroy(&self) {
        if self.state.destroyed.swap(true, Ordering::AcqRel) {
            return;
        }

        let removed = self.source.remove_listener(self.listener_id);
        metrics::counter!("analytics_destroyed_total").increment(1);
        debug!(
            listener_id = ?self.listener_id,
            removed,
            "Click counter destroyed"
        );
    }

    /// Returns the current tally, or [`ClickCount::Destroyed`] after
    /// [`destroy`](Self::destroy).
    pub fn get_clicks(&self) -> ClickCount {
        if self.state.destroyed.load(Ordering::Acquire) {
            return ClickCount::Destroyed;
        }

        ClickCount::Active(self.state.count.load(Ordering::Acquire))
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.destroyed.load(Ordering::Acquire)
    }
}

impl Drop for ClickCounter {
    fn drop(&mut self) {
        if self.state.destroyed.swap(true, Ordering::AcqRel) {
            return;
        }

        let removed = self.source.remove_listener(self.listener_id);
        debug!(listener_id = ?self.listener_id, removed, "Click counter dropped");
    }
}

impl fmt::Debug for ClickCounter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ClickCounter")
            .field("listener_id", &self.listener_id)
            .field("clicks", &self.get_clicks())
            .finish()
    }
}
