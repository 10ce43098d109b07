//! No-op sink for tests or disabled diagnostics.

use super::sink::ClickSink;
use tracing::debug;

/// A sink that discards every record.
pub struct NullSink;

impl NullSink {
    /// Creates a new NullSink instance.
    pub fn new() -> Self {
        debug!("Using NullSink (click diagnostics disabled)");
        Self
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ClickSink for NullSink {
    fn record(&self, _count: u64) {}
}
