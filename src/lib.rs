//! # Click Analytics
//!
//! A click counter with lifecycle control, attached to an injected
//! document-like event source and exposed to the host under a named global.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Events, the event source, the counter, and the dispatch loop
//! - **Infrastructure Layer** ([`infrastructure`]) - Diagnostic sinks for click logging
//! - **Namespace** ([`namespace`]) - Named globals the host exposes counters under
//! - **Host** ([`host`]) - Bootstrap and async handle around the dispatch queue
//!
//! ## Quick Start
//!
//! ```bash
//! # Count three clicks, then print the tally
//! cargo run -- simulate --clicks 3
//!
//! # Destroy after the first click; the result is the destroyed message
//! cargo run -- simulate --clicks 5 --destroy-after 1
//! ```
//!
//! ## Library Use
//!
//! ```
//! use std::sync::Arc;
//! use click_analytics::prelude::*;
//!
//! let document = Arc::new(Document::new());
//! let counter = ClickCounter::create(document.clone(), Arc::new(NullSink::new()));
//!
//! document.dispatch(&UiEvent::click());
//! assert_eq!(counter.get_clicks(), ClickCount::Active(1));
//!
//! counter.destroy();
//! assert_eq!(counter.get_clicks(), ClickCount::Destroyed);
//! ```
//!
//! ## Configuration
//!
//! The binary reads its settings from environment variables via [`config::Config`].

pub mod config;
pub mod domain;
pub mod error;
pub mod host;
pub mod infrastructure;
pub mod namespace;

pub use error::AppError;
pub use host::{Host, HostHandle};

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::domain::click_counter::{ClickCount, ClickCounter};
    pub use crate::domain::event_source::{Document, EventSource, Listener, ListenerId};
    pub use crate::domain::ui_event::{EventKind, UiEvent};
    pub use crate::error::AppError;
    pub use crate::host::{Host, HostHandle};
    pub use crate::infrastructure::diagnostics::{ClickSink, NullSink, TracingSink};
    pub use crate::namespace::HostNamespace;
}
