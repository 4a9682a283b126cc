//! Mock API client for deterministic testing.
//!
//! Scripted responses, optional failure injection, simulated latency, and a
//! call log. All behavior is deterministic; the latency uses the tokio clock
//! and cooperates with paused-time tests.
//!
//! ## Usage
//!
//! ```ignore
//! let api = MockApi::new()
//!     .with_batch(vec![notification("unread_message_count", json!(3), 10.0)])
//!     .with_translation("hello");
//!
//! let batch = api.notifications(0.0).await?;
//! assert_eq!(api.call_count("notifications"), 1);
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use chirp_core::{ApiClient, Error, Notification, Result, TranslateRequest};

/// One recorded call against the mock.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// Operation name: "notifications", "translate", or "user_popup".
    pub operation: String,
    /// Operation-specific input (cursor, text, or username).
    pub input: String,
}

#[derive(Debug, Default)]
struct MockState {
    batches: VecDeque<Vec<Notification>>,
    fail_notifications: bool,
    translation: Option<String>,
    fail_translate: bool,
    popup_html: HashMap<String, String>,
    default_popup_html: String,
    fail_popup: bool,
    latency_ms: u64,
    calls: Vec<MockCall>,
}

/// Mock implementation of [`ApiClient`].
#[derive(Clone, Default)]
pub struct MockApi {
    state: Arc<Mutex<MockState>>,
}

impl MockApi {
    /// Create a new mock with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notification batch; each poll pops the next queued batch.
    /// An empty queue yields empty batches.
    pub fn with_batch(self, batch: Vec<Notification>) -> Self {
        self.state.lock().unwrap().batches.push_back(batch);
        self
    }

    /// Set the text returned by translation requests.
    pub fn with_translation(self, text: impl Into<String>) -> Self {
        self.state.lock().unwrap().translation = Some(text.into());
        self
    }

    /// Set the popup HTML returned for a specific username.
    pub fn with_popup_html(self, username: impl Into<String>, html: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .popup_html
            .insert(username.into(), html.into());
        self
    }

    /// Make notification fetches fail.
    pub fn failing_notifications(self, fail: bool) -> Self {
        self.state.lock().unwrap().fail_notifications = fail;
        self
    }

    /// Make translation requests fail.
    pub fn failing_translate(self, fail: bool) -> Self {
        self.state.lock().unwrap().fail_translate = fail;
        self
    }

    /// Make popup fetches fail.
    pub fn failing_popup(self, fail: bool) -> Self {
        self.state.lock().unwrap().fail_popup = fail;
        self
    }

    /// Simulated latency applied to every operation.
    pub fn with_latency_ms(self, latency_ms: u64) -> Self {
        self.state.lock().unwrap().latency_ms = latency_ms;
        self
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of recorded calls for one operation.
    pub fn call_count(&self, operation: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.operation == operation)
            .count()
    }

    fn record(&self, operation: &str, input: String) {
        self.state.lock().unwrap().calls.push(MockCall {
            operation: operation.to_string(),
            input,
        });
    }

    async fn simulate_latency(&self) {
        let latency_ms = self.state.lock().unwrap().latency_ms;
        if latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(latency_ms)).await;
        }
    }
}

#[async_trait]
impl ApiClient for MockApi {
    async fn notifications(&self, since: f64) -> Result<Vec<Notification>> {
        self.record("notifications", since.to_string());
        self.simulate_latency().await;

        let mut state = self.state.lock().unwrap();
        if state.fail_notifications {
            return Err(Error::Request("mock notifications failure".to_string()));
        }
        Ok(state.batches.pop_front().unwrap_or_default())
    }

    async fn translate(&self, request: TranslateRequest) -> Result<String> {
        self.record("translate", request.text.clone());
        self.simulate_latency().await;

        let state = self.state.lock().unwrap();
        if state.fail_translate {
            return Err(Error::Request("mock translate failure".to_string()));
        }
        Ok(state
            .translation
            .clone()
            .unwrap_or_else(|| "mock translation".to_string()))
    }

    async fn user_popup(&self, username: &str) -> Result<String> {
        self.record("user_popup", username.to_string());
        self.simulate_latency().await;

        let state = self.state.lock().unwrap();
        if state.fail_popup {
            return Err(Error::Request("mock popup failure".to_string()));
        }
        Ok(state
            .popup_html
            .get(username)
            .cloned()
            .unwrap_or_else(|| state.default_popup_html.clone()))
    }
}
