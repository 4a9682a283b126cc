//! View traits standing in for the rendered page surface.
//!
//! The behaviors in `chirp-live` never touch markup directly; they drive
//! these narrow traits. An embedder backs them with its actual UI, tests
//! back them with in-memory doubles.

use std::sync::{Arc, Mutex};

/// The unread-message counter.
///
/// Implementations should show the counter when `count > 0` and hide it when
/// the count drops to zero.
pub trait MessageCountView: Send + Sync {
    fn set_message_count(&self, count: i64);
}

/// A progress indicator keyed by background-task id.
pub trait TaskProgressView: Send + Sync {
    fn set_task_progress(&self, task_id: &str, progress: f64);
}

/// The mutable text of one displayed post.
pub trait TextSlot: Send + Sync {
    /// The currently displayed text.
    fn text(&self) -> String;
    /// Replace the displayed text.
    fn set_text(&self, text: &str);
}

/// A profile popover anchored to one hovered element.
pub trait PopupView: Send + Sync {
    /// Render the popover with the given HTML fragment.
    fn show(&self, html: &str);
    /// Tear the popover down.
    fn destroy(&self);
    /// Re-render relative-time displays inside a freshly shown popover.
    fn refresh_timestamps(&self) {}
}

/// In-memory [`TextSlot`] backed by a shared string.
///
/// Useful for tests and for embedders that keep display text in process
/// memory rather than in a retained widget tree.
#[derive(Debug, Clone, Default)]
pub struct SharedText {
    inner: Arc<Mutex<String>>,
}

impl SharedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(text.into())),
        }
    }
}

impl TextSlot for SharedText {
    fn text(&self) -> String {
        self.inner.lock().unwrap().clone()
    }

    fn set_text(&self, text: &str) {
        *self.inner.lock().unwrap() = text.to_string();
    }
}
