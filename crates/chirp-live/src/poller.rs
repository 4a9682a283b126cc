//! Notification poller: periodic fetch, handler dispatch, cursor advance.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::sync::{broadcast, mpsc, watch, RwLock};
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use chirp_core::notification::{TASK_PROGRESS, UNREAD_MESSAGE_COUNT};
use chirp_core::{
    defaults, ApiClient, Error, MessageCountView, Result, TaskProgress, TaskProgressView,
};

/// Configuration for the notification poller.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Polling interval in milliseconds.
    pub interval_ms: u64,
    /// Whether to enable polling.
    pub enabled: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_ms: defaults::POLL_INTERVAL_MS,
            enabled: true,
        }
    }
}

impl PollerConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `CHIRP_POLLER_ENABLED` | `true` | Enable/disable polling |
    /// | `CHIRP_POLL_INTERVAL_MS` | `10000` | Polling interval |
    pub fn from_env() -> Self {
        let enabled = std::env::var("CHIRP_POLLER_ENABLED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let interval_ms = std::env::var("CHIRP_POLL_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::POLL_INTERVAL_MS);

        Self {
            interval_ms,
            enabled,
        }
    }

    /// Create a new config with custom poll interval.
    pub fn with_interval_ms(mut self, ms: u64) -> Self {
        self.interval_ms = ms;
        self
    }

    /// Enable or disable polling.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Poll cursor state.
///
/// Owned by exactly one poller; `since` only ever advances to the timestamp
/// of the last processed notification, never past an unprocessed entry.
#[derive(Debug, Clone, Default)]
pub struct PollState {
    /// Timestamp of the newest notification seen so far (epoch seconds).
    pub since: f64,
}

impl PollState {
    /// Start from a previously observed cursor.
    pub fn resume_from(since: f64) -> Self {
        Self { since }
    }
}

/// Event emitted by the poller.
#[derive(Debug, Clone)]
pub enum PollerEvent {
    /// Poller started.
    Started,
    /// Poller stopped.
    Stopped,
    /// A batch was fetched and dispatched.
    Batch { count: usize, cursor: f64 },
    /// A poll failed; the cursor was not advanced.
    Failed { error: String },
}

/// Trait for notification handlers, keyed by event name.
#[async_trait]
pub trait NotificationHandler: Send + Sync {
    /// The event name this handler processes.
    fn name(&self) -> &str;

    /// Handle one notification payload.
    async fn handle(&self, data: &JsonValue) -> Result<()>;
}

/// Handler wrapping a plain function, for tests and ad hoc wiring.
pub struct FnHandler {
    name: String,
    f: Box<dyn Fn(&JsonValue) + Send + Sync>,
}

impl FnHandler {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&JsonValue) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            f: Box::new(f),
        }
    }
}

#[async_trait]
impl NotificationHandler for FnHandler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, data: &JsonValue) -> Result<()> {
        (self.f)(data);
        Ok(())
    }
}

/// Built-in handler for `unread_message_count` notifications.
pub struct UnreadMessageCountHandler {
    view: Arc<dyn MessageCountView>,
}

impl UnreadMessageCountHandler {
    pub fn new(view: Arc<dyn MessageCountView>) -> Self {
        Self { view }
    }
}

#[async_trait]
impl NotificationHandler for UnreadMessageCountHandler {
    fn name(&self) -> &str {
        UNREAD_MESSAGE_COUNT
    }

    async fn handle(&self, data: &JsonValue) -> Result<()> {
        let count = data
            .as_i64()
            .ok_or_else(|| Error::Serialization(format!("expected integer count, got {}", data)))?;
        self.view.set_message_count(count);
        Ok(())
    }
}

/// Built-in handler for `task_progress` notifications.
pub struct TaskProgressHandler {
    view: Arc<dyn TaskProgressView>,
}

impl TaskProgressHandler {
    pub fn new(view: Arc<dyn TaskProgressView>) -> Self {
        Self { view }
    }
}

#[async_trait]
impl NotificationHandler for TaskProgressHandler {
    fn name(&self) -> &str {
        TASK_PROGRESS
    }

    async fn handle(&self, data: &JsonValue) -> Result<()> {
        let progress: TaskProgress = serde_json::from_value(data.clone())?;
        self.view.set_task_progress(&progress.task_id, progress.progress);
        Ok(())
    }
}

/// Handle for controlling a running poller.
pub struct PollerHandle {
    shutdown_tx: mpsc::Sender<()>,
    event_rx: broadcast::Receiver<PollerEvent>,
    cursor_rx: watch::Receiver<f64>,
}

impl PollerHandle {
    /// Signal the poller to shut down gracefully.
    pub async fn shutdown(&self) -> Result<()> {
        self.shutdown_tx
            .send(())
            .await
            .map_err(|_| Error::Internal("Failed to send shutdown signal".into()))?;
        Ok(())
    }

    /// Get a receiver for poller events.
    pub fn events(&self) -> broadcast::Receiver<PollerEvent> {
        self.event_rx.resubscribe()
    }

    /// The most recently published cursor value.
    pub fn cursor(&self) -> f64 {
        *self.cursor_rx.borrow()
    }
}

/// Notification poller.
///
/// Every `interval_ms`, fetches notifications newer than the cursor and
/// dispatches each to the handler registered for its name, in arrival order.
/// The cursor advances to each entry's timestamp whether or not a handler
/// existed; failed polls leave it untouched for the next tick to retry.
pub struct NotificationPoller {
    api: Arc<dyn ApiClient>,
    config: PollerConfig,
    handlers: Arc<RwLock<HashMap<String, Arc<dyn NotificationHandler>>>>,
    state: PollState,
    event_tx: broadcast::Sender<PollerEvent>,
    cursor_tx: watch::Sender<f64>,
}

impl NotificationPoller {
    /// Create a new poller over the given API with an explicit cursor state.
    pub fn new(api: Arc<dyn ApiClient>, config: PollerConfig, state: PollState) -> Self {
        let (event_tx, _) = broadcast::channel(defaults::EVENT_BUS_CAPACITY);
        let (cursor_tx, _) = watch::channel(state.since);
        Self {
            api,
            config,
            handlers: Arc::new(RwLock::new(HashMap::new())),
            state,
            event_tx,
            cursor_tx,
        }
    }

    /// Register a handler for its event name.
    pub async fn register_handler<H: NotificationHandler + 'static>(&self, handler: H) {
        let name = handler.name().to_string();
        let mut handlers = self.handlers.write().await;
        handlers.insert(name.clone(), Arc::new(handler));
        debug!(event_name = %name, "Registered notification handler");
    }

    /// The current cursor value.
    pub fn cursor(&self) -> f64 {
        self.state.since
    }

    /// Get a receiver for poller events.
    pub fn events(&self) -> broadcast::Receiver<PollerEvent> {
        self.event_tx.subscribe()
    }

    /// Run one fetch-dispatch-advance round.
    ///
    /// Unknown event names are skipped without error; the cursor still
    /// advances past them. A failed fetch leaves the cursor unchanged.
    pub async fn poll_once(&mut self) {
        match self.api.notifications(self.state.since).await {
            Ok(batch) => {
                let count = batch.len();
                for notification in &batch {
                    let handler = {
                        let handlers = self.handlers.read().await;
                        handlers.get(&notification.name).cloned()
                    };

                    match handler {
                        Some(handler) => {
                            if let Err(e) = handler.handle(&notification.data).await {
                                warn!(
                                    event_name = %notification.name,
                                    error = %e,
                                    "Notification handler failed"
                                );
                            }
                        }
                        None => {
                            debug!(event_name = %notification.name, "No handler registered, ignoring");
                        }
                    }

                    self.state.since = notification.timestamp;
                    let _ = self.cursor_tx.send(self.state.since);
                }

                debug!(batch_count = count, cursor = self.state.since, "Poll applied");
                let _ = self.event_tx.send(PollerEvent::Batch {
                    count,
                    cursor: self.state.since,
                });
            }
            Err(e) => {
                // Dropped silently at the contract level; next tick retries
                // with the same cursor.
                debug!(error = %e, cursor = self.state.since, "Poll failed");
                let _ = self.event_tx.send(PollerEvent::Failed {
                    error: e.to_string(),
                });
            }
        }
    }

    /// Start the poller and return a handle for control.
    pub fn start(mut self) -> PollerHandle {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);
        let event_rx = self.event_tx.subscribe();
        let cursor_rx = self.cursor_tx.subscribe();

        tokio::spawn(async move {
            self.run(&mut shutdown_rx).await;
        });

        PollerHandle {
            shutdown_tx,
            event_rx,
            cursor_rx,
        }
    }

    /// Run the poll loop until shutdown.
    #[instrument(skip(self, shutdown_rx))]
    async fn run(&mut self, shutdown_rx: &mut mpsc::Receiver<()>) {
        if !self.config.enabled {
            info!("Notification poller is disabled, not starting");
            return;
        }

        info!(
            interval_ms = self.config.interval_ms,
            cursor = self.state.since,
            "Notification poller started"
        );
        let _ = self.event_tx.send(PollerEvent::Started);

        let interval = Duration::from_millis(self.config.interval_ms);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Notification poller received shutdown signal");
                    break;
                }
                _ = sleep(interval) => {
                    self.poll_once().await;
                }
            }
        }

        let _ = self.event_tx.send(PollerEvent::Stopped);
        info!("Notification poller stopped");
    }
}
