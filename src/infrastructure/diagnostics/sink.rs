//! Click sink trait.

/// Receives the post-increment count every time a counter observes a click.
///
/// Sinks are purely observational. Nothing reads back from them, and a
/// sink must not call into the counter that reports to it.
#[cfg_attr(test, mockall::automock)]
pub trait ClickSink: Send + Sync {
    /// Records that the counter has reached `count`.
    fn record(&self, count: u64);
}
