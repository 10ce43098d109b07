//! Sink that reports clicks through `tracing`.

use super::sink::ClickSink;

/// Tag attached to every click record unless configured otherwise.
pub const DEFAULT_TAG: &str = "222";

/// Emits an `INFO` event for each click.
///
/// # Example Logs
///
/// ```text
/// INFO click_analytics::infrastructure::diagnostics::tracing_sink: Click recorded count=3 tag="222"
/// ```
#[derive(Debug, Clone)]
pub struct TracingSink {
    tag: String,
}

impl TracingSink {
    /// Creates a sink that labels each record with `tag`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(DEFAULT_TAG)
    }
}

impl ClickSink for TracingSink {
    fn record(&self, count: u64) {
        tracing::info!(count, tag = self.tag.as_str(), "Click recorded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::click_counter::ClickCounter;
    use crate::domain::event_source::Document;
    use crate::domain::ui_event::UiEvent;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// In-memory writer shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, f);
        logs.contents()
    }

    fn click_lines(output: &str) -> Vec<&str> {
        output
            .lines()
            .filter(|line| line.contains("Click recorded"))
            .collect()
    }

    #[test]
    fn test_default_tag() {
        assert_eq!(TracingSink::default().tag(), "222");
        assert_eq!(TracingSink::new("dbg").tag(), "dbg");
    }

    #[test]
    fn test_record_emits_count_and_tag() {
        let output = capture(|| {
            let sink = TracingSink::default();
            for n in 1..=3 {
                sink.record(n);
            }
        });

        let lines = click_lines(&output);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("count=3"));
        assert!(lines.iter().all(|line| line.contains("tag=\"222\"")));
        assert!(lines[0].contains("INFO"));
    }

    #[test]
    fn test_one_event_per_counted_click() {
        let output = capture(|| {
            let document = Arc::new(Document::new());
            let counter =
                ClickCounter::create(document.clone(), Arc::new(TracingSink::default()));
            for _ in 0..3 {
                document.dispatch(&UiEvent::click());
            }
            counter.destroy();
            document.dispatch(&UiEvent::click());
        });

        let lines = click_lines(&output);
        assert_eq!(lines.len(), 3);
        for (line, n) in lines.iter().zip(1..) {
            assert!(line.contains(&format!("count={n}")), "unexpected line: {line}");
            assert!(line.contains("tag=\"222\""));
        }
    }

    #[test]
    fn test_custom_tag_is_reported() {
        let output = capture(|| TracingSink::new("dbg").record(1));

        let lines = click_lines(&output);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("tag=\"dbg\""));
    }

    #[test]
    fn test_record_without_subscriber_does_not_panic() {
        let sink = TracingSink::default();
        sink.record(1);
        sink.record(2);
    }
}
