//! Host bootstrap and runtime handle.
//!
//! Wires the document, the diagnostic sink, and the click counter together,
//! exposes the counter under its global name, and starts the event loop.

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::click_counter::{ClickCount, ClickCounter};
use crate::domain::event_loop::{HostMessage, run_event_loop};
use crate::domain::event_source::Document;
use crate::domain::ui_event::UiEvent;
use crate::error::{AppError, Result};
use crate::infrastructure::diagnostics::{ClickSink, NullSink, TracingSink};
use crate::namespace::HostNamespace;

/// Handle to a running host.
///
/// Cloneable; every clone feeds the same dispatch queue. The event loop
/// stops once [`shutdown`](Self::shutdown) is called on the owning handle
/// and every clone has been dropped.
#[derive(Clone)]
pub struct HostHandle {
    tx: mpsc::Sender<HostMessage>,
    namespace: Arc<HostNamespace>,
    document: Arc<Document>,
    global_name: String,
}

/// Owns the event loop task.
pub struct Host {
    handle: HostHandle,
    worker: JoinHandle<()>,
}

impl Host {
    /// Starts a host with the given configuration.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidConfig`] if the event queue capacity is 0.
    /// Returns [`AppError::InvalidGlobalName`] if the configured global name
    /// cannot be exposed.
    pub fn start(config: &Config) -> Result<Self> {
        if config.event_queue_capacity == 0 {
            return Err(AppError::InvalidConfig(
                "event queue capacity must be at least 1".to_string(),
            ));
        }

        let document = Arc::new(Document::new());
        let namespace = Arc::new(HostNamespace::new());

        let sink: Arc<dyn ClickSink> = if config.diagnostics_enabled {
            info!(tag = %config.diagnostic_tag, "Click diagnostics enabled");
            Arc::new(TracingSink::new(config.diagnostic_tag.clone()))
        } else {
            info!("Click diagnostics disabled (NullSink)");
            Arc::new(NullSink::new())
        };

        let counter = ClickCounter::create(document.clone(), sink);
        namespace.expose(&config.global_name, Arc::new(counter))?;

        let (tx, rx) = mpsc::channel(config.event_queue_capacity);
        let worker = tokio::spawn(run_event_loop(rx, document.clone(), namespace.clone()));

        Ok(Self {
            handle: HostHandle {
                tx,
                namespace,
                document,
                global_name: config.global_name.clone(),
            },
            worker,
        })
    }

    pub fn handle(&self) -> &HostHandle {
        &self.handle
    }

    /// Closes the queue and waits for already queued messages to drain.
    pub async fn shutdown(self) {
        let Self { handle, worker } = self;
        drop(handle);
        if let Err(e) = worker.await {
            warn!(error = %e, "Event loop task failed");
        }
    }
}

impl HostHandle {
    /// Queues `event` for dispatch on the document.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::QueueClosed`] if the event loop has stopped.
    pub async fn dispatch(&self, event: UiEvent) -> Result<()> {
        self.tx
            .send(HostMessage::Dispatch(event))
            .await
            .map_err(|_| AppError::QueueClosed)
    }

    /// Queues a click with no target.
    pub async fn click(&self) -> Result<()> {
        self.dispatch(UiEvent::click()).await
    }

    /// Destroys the counter exposed under `global`, in queue order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::GlobalNotFound`] for an unknown global.
    /// Returns [`AppError::QueueClosed`] if the event loop has stopped.
    pub async fn destroy(&self, global: &str) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(HostMessage::Destroy {
                global: global.to_string(),
                reply: Some(reply),
            })
            .await
            .map_err(|_| AppError::QueueClosed)?;
        rx.await.map_err(|_| AppError::QueueClosed)?
    }

    /// Reads `get_clicks` from the counter exposed under `global`, in queue
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::GlobalNotFound`] for an unknown global.
    /// Returns [`AppError::QueueClosed`] if the event loop has stopped.
    pub async fn get_clicks(&self, global: &str) -> Result<ClickCount> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(HostMessage::Inspect {
                global: global.to_string(),
                reply,
            })
            .await
            .map_err(|_| AppError::QueueClosed)?;
        rx.await.map_err(|_| AppError::QueueClosed)?
    }

    /// Global name the host's own counter was exposed under.
    pub fn global_name(&self) -> &str {
        &self.global_name
    }

    pub fn namespace(&self) -> &Arc<HostNamespace> {
        &self.namespace
    }

    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }
}
