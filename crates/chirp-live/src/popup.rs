//! Hover popup controller.
//!
//! Models the hover-to-profile-popup interaction as an explicit state
//! machine. Each session is in exactly one of four phases; the tagged enum
//! makes the at-most-one-of {timer, request, popover} invariant structural
//! rather than a convention over nullable handles.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::{debug, warn};

use chirp_core::{defaults, ApiClient, PopupView};

/// Configuration for hover sessions.
#[derive(Debug, Clone)]
pub struct HoverConfig {
    /// Delay between hover-enter and the profile fetch, in milliseconds.
    pub delay_ms: u64,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            delay_ms: defaults::HOVER_DELAY_MS,
        }
    }
}

impl HoverConfig {
    /// Create config from environment variables (with defaults).
    ///
    /// | Variable | Default | Description |
    /// |----------|---------|-------------|
    /// | `CHIRP_HOVER_DELAY_MS` | `1000` | Hover delay before fetching |
    pub fn from_env() -> Self {
        let delay_ms = std::env::var("CHIRP_HOVER_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(defaults::HOVER_DELAY_MS);

        Self { delay_ms }
    }

    /// Set the hover delay.
    pub fn with_delay_ms(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

/// Observable phase of a hover session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverPhase {
    /// No timer, no request, no popover.
    Idle,
    /// The delay timer is armed; no request has been issued.
    Pending,
    /// The delay elapsed and the profile fetch is in flight.
    InFlight,
    /// The popover is rendered.
    Shown,
}

/// Internal tagged state. Pending and InFlight hold the abort handle of the
/// one task driving the delay and the fetch; Shown means the view owns a
/// rendered popover.
enum SessionState {
    Idle,
    Pending(AbortHandle),
    InFlight(AbortHandle),
    Shown,
}

/// One hover session per hovered element.
///
/// `hover_enter` arms the delay timer; once it elapses a profile fetch is
/// issued and, on success, the popover rendered. `hover_exit` undoes
/// whichever of those has happened: cancels the timer, aborts the in-flight
/// request, or destroys the popover.
pub struct HoverSession {
    inner: SessionRef,
    config: HoverConfig,
}

/// Reference bundle shared with the spawned delay-and-fetch task.
#[derive(Clone)]
struct SessionRef {
    api: Arc<dyn ApiClient>,
    view: Arc<dyn PopupView>,
    username: String,
    state: Arc<Mutex<SessionState>>,
}

impl HoverSession {
    /// Create a session for the element identified by `username`.
    pub fn new(
        api: Arc<dyn ApiClient>,
        view: Arc<dyn PopupView>,
        username: impl Into<String>,
        config: HoverConfig,
    ) -> Self {
        Self {
            inner: SessionRef {
                api,
                view,
                username: username.into(),
                state: Arc::new(Mutex::new(SessionState::Idle)),
            },
            config,
        }
    }

    /// The current phase.
    pub fn phase(&self) -> HoverPhase {
        match *self.inner.state.lock().unwrap() {
            SessionState::Idle => HoverPhase::Idle,
            SessionState::Pending(_) => HoverPhase::Pending,
            SessionState::InFlight(_) => HoverPhase::InFlight,
            SessionState::Shown => HoverPhase::Shown,
        }
    }

    /// Hover entered the element: arm the delay timer.
    ///
    /// A no-op in any phase but Idle.
    pub fn hover_enter(&self) {
        let mut state = self.inner.state.lock().unwrap();
        if !matches!(*state, SessionState::Idle) {
            return;
        }

        let session = self.inner.clone();
        let delay = Duration::from_millis(self.config.delay_ms);
        let task = tokio::spawn(async move {
            session.delay_and_fetch(delay).await;
        });

        debug!(username = %self.inner.username, "Hover timer armed");
        *state = SessionState::Pending(task.abort_handle());
    }

    /// Hover left the element: cancel, abort, or destroy depending on phase.
    ///
    /// Always ends Idle.
    pub fn hover_exit(&self) {
        let mut state = self.inner.state.lock().unwrap();
        match std::mem::replace(&mut *state, SessionState::Idle) {
            SessionState::Idle => {}
            SessionState::Pending(task) => {
                debug!(username = %self.inner.username, "Hover timer cancelled");
                task.abort();
            }
            SessionState::InFlight(task) => {
                debug!(username = %self.inner.username, "Popup fetch aborted");
                task.abort();
            }
            SessionState::Shown => {
                debug!(username = %self.inner.username, "Popover destroyed");
                self.inner.view.destroy();
            }
        }
    }
}

impl SessionRef {
    /// The one task behind a hover: wait out the delay, fetch the profile
    /// fragment, render it. Each transition re-checks the shared state so a
    /// concurrent hover-exit wins.
    async fn delay_and_fetch(self, delay: Duration) {
        tokio::time::sleep(delay).await;

        {
            let mut state = self.state.lock().unwrap();
            match std::mem::replace(&mut *state, SessionState::Idle) {
                SessionState::Pending(task) => *state = SessionState::InFlight(task),
                // Hover already exited; put back whatever replaced us.
                other => {
                    *state = other;
                    return;
                }
            }
        }

        match self.api.user_popup(&self.username).await {
            Ok(html) => {
                let mut state = self.state.lock().unwrap();
                if matches!(*state, SessionState::InFlight(_)) {
                    self.view.show(&html);
                    self.view.refresh_timestamps();
                    *state = SessionState::Shown;
                }
            }
            Err(e) => {
                warn!(username = %self.username, error = %e, "Profile popup fetch failed");
                let mut state = self.state.lock().unwrap();
                if matches!(*state, SessionState::InFlight(_)) {
                    *state = SessionState::Idle;
                }
            }
        }
    }
}
