//! Domain layer: the click counter and the event machinery it sits on.
//!
//! # Architecture
//!
//! - [`ui_event`] - Event model delivered by the shared event source
//! - [`event_source`] - Listener registration trait and the in-process [`event_source::Document`]
//! - [`click_counter`] - Click tally with a one-way destroy lifecycle
//! - [`event_loop`] - Single dispatch queue feeding the document
//!
//! # Click Flow
//!
//! 1. The host pushes a [`event_loop::HostMessage::Dispatch`] onto the queue
//! 2. [`event_loop::run_event_loop`] hands the event to the document
//! 3. The document invokes the counter's listener synchronously
//! 4. The counter increments and reports to its [`crate::infrastructure::diagnostics::ClickSink`]

pub mod click_counter;
pub mod event_loop;
pub mod event_source;
pub mod ui_event;
