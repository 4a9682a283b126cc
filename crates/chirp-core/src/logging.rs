//! Structured logging field name constants for chirp.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log queries work the same across the client and the behaviors.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | WARN  | Recoverable issue (undecodable payload, failed popup fetch) |
//! | INFO  | Lifecycle events (poller start/stop) |
//! | DEBUG | Per-poll outcomes, dispatch decisions, dropped failures |

/// Component originating the log event.
/// Values: "poller", "translator", "popup", "http"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "poll", "translate", "user_popup"
pub const OPERATION: &str = "op";

/// Notification event name being dispatched.
pub const EVENT_NAME: &str = "event_name";

/// Current poll cursor value.
pub const CURSOR: &str = "cursor";

/// Username a popup fetch targets.
pub const USERNAME: &str = "username";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of notifications in a batch.
pub const BATCH_COUNT: &str = "batch_count";
