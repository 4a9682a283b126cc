//! # chirp-live
//!
//! The three live-update behaviors of the chirp client:
//!
//! - [`poller`] — periodic notification polling with per-event-name handler
//!   dispatch and a monotonically advancing cursor.
//! - [`translate`] — on-demand text translation with an
//!   optimistic-concurrency guard against stale responses.
//! - [`popup`] — the hover-to-profile-popup interaction as an explicit
//!   Idle / Pending / InFlight / Shown state machine with cancellation.
//!
//! The behaviors are independent; they share only the [`chirp_core`] server
//! contract and view traits.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use chirp_client::HttpApi;
//! use chirp_live::{NotificationPoller, PollerConfig, PollState, UnreadMessageCountHandler};
//!
//! let api = Arc::new(HttpApi::from_env()?);
//! let poller = NotificationPoller::new(api, PollerConfig::default(), PollState::default());
//! poller.register_handler(UnreadMessageCountHandler::new(counter_view)).await;
//!
//! let handle = poller.start();
//! // ... page lifetime ...
//! handle.shutdown().await?;
//! ```

pub mod poller;
pub mod popup;
pub mod translate;

pub use poller::{
    FnHandler, NotificationHandler, NotificationPoller, PollState, PollerConfig, PollerEvent,
    PollerHandle, TaskProgressHandler, UnreadMessageCountHandler,
};
pub use popup::{HoverConfig, HoverPhase, HoverSession};
pub use translate::{TranslationOutcome, Translator};

// Re-export core types
pub use chirp_core::{ApiClient, Notification, Result, TranslateRequest};
