//! Diagnostic side channel for click events.
//!
//! Provides a [`ClickSink`] trait with two implementations:
//! - [`TracingSink`] - Emits one `tracing` event per click
//! - [`NullSink`] - No-op implementation for tests or disabled diagnostics

mod null_sink;
mod sink;
mod tracing_sink;

pub use null_sink::NullSink;
pub use sink::ClickSink;
pub use tracing_sink::{DEFAULT_TAG, TracingSink};

#[cfg(test)]
pub use sink::MockClickSink;
