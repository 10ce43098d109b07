//! Single dispatch queue driving the document.
//!
//! Every interaction with the document and its counters goes through one
//! mpsc queue and is handled one message at a time, so a click listener
//! never runs concurrently with `destroy` or `get_clicks` issued through the
//! queue.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::domain::click_counter::ClickCount;
use crate::domain::event_source::Document;
use crate::domain::ui_event::UiEvent;
use crate::error::Result;
use crate::namespace::HostNamespace;

/// A unit of work for the event loop.
#[derive(Debug)]
pub enum HostMessage {
    /// Deliver an event to the document's listeners.
    Dispatch(UiEvent),
    /// Call `destroy` on the counter exposed under `global`.
    Destroy {
        global: String,
        reply: Option<oneshot::Sender<Result<()>>>,
    },
    /// Call `get_clicks` on the counter exposed under `global`.
    Inspect {
        global: String,
        reply: oneshot::Sender<Result<ClickCount>>,
    },
}

/// Drains `rx` until every sender is dropped.
///
/// Per-message failures (an unknown global, a caller that stopped waiting
/// for its reply) are logged and do not stop the loop.
pub async fn run_event_loop(
    mut rx: mpsc::Receiver<HostMessage>,
    document: Arc<Document>,
    namespace: Arc<HostNamespace>,
) {
    info!("Event loop started");
    let mut processed: u64 = 0;

    while let Some(message) = rx.recv().await {
        processed += 1;
        match message {
            HostMessage::Dispatch(event) => {
                document.dispatch(&event);
            }
            HostMessage::Destroy { global, reply } => {
                let result = namespace.require(&global).map(|counter| counter.destroy());
                if let Err(ref e) = result {
                    warn!(global = %global, error = %e, "Destroy failed");
                }
                if let Some(reply) = reply
                    && reply.send(result).is_err()
                {
                    debug!(global = %global, "Destroy caller went away");
                }
            }
            HostMessage::Inspect { global, reply } => {
                let result = namespace
                    .require(&global)
                    .map(|counter| counter.get_clicks());
                if reply.send(result).is_err() {
                    debug!(global = %global, "Inspect caller went away");
                }
            }
        }
    }

    info!(processed, "Event loop stopped");
}
