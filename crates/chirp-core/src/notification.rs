//! Notification wire types.
//!
//! The server delivers notifications as an ordered JSON array of
//! `{name, data, timestamp}` records. `timestamp` is a server-assigned
//! epoch-seconds float that doubles as the poll cursor; `name` selects the
//! client-side handler; `data` is a handler-specific payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Result;

/// Event name for unread-message counter updates. Payload: integer count.
pub const UNREAD_MESSAGE_COUNT: &str = "unread_message_count";

/// Event name for background task progress. Payload: [`TaskProgress`].
pub const TASK_PROGRESS: &str = "task_progress";

/// One notification record as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Handler selector.
    pub name: String,
    /// Handler-specific payload.
    pub data: JsonValue,
    /// Server-assigned cursor value (epoch seconds, monotonically
    /// non-decreasing within a user's stream).
    pub timestamp: f64,
}

impl Notification {
    /// Decode the payload into a typed value.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }
}

/// Payload of a [`TASK_PROGRESS`] notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskProgress {
    /// Identifier of the background task being reported on.
    pub task_id: String,
    /// Completion percentage, 0.0 to 100.0.
    pub progress: f64,
}
