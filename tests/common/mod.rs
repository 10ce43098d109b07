#![allow(dead_code)]

use click_analytics::config::Config;
use click_analytics::prelude::*;
use std::sync::{Arc, Mutex};

/// A document with one counter attached, reporting into a [`RecordingSink`].
pub fn attached_counter() -> (Arc<Document>, ClickCounter, Arc<RecordingSink>) {
    let document = Arc::new(Document::new());
    let sink = Arc::new(RecordingSink::default());
    let counter = ClickCounter::create(document.clone(), sink.clone());
    (document, counter, sink)
}

pub fn click_n(document: &Document, n: usize) {
    for _ in 0..n {
        document.dispatch(&UiEvent::click());
    }
}

/// Sink that keeps every reported count.
#[derive(Default)]
pub struct RecordingSink {
    counts: Mutex<Vec<u64>>,
}

impl RecordingSink {
    pub fn counts(&self) -> Vec<u64> {
        self.counts.lock().unwrap().clone()
    }
}

impl ClickSink for RecordingSink {
    fn record(&self, count: u64) {
        self.counts.lock().unwrap().push(count);
    }
}

pub fn test_config() -> Config {
    Config {
        diagnostics_enabled: false,
        event_queue_capacity: 16,
        ..Config::default()
    }
}
