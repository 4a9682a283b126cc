//! Centralized default constants for the chirp client.
//!
//! **This module is the single source of truth** for all shared default
//! values. The client and behavior crates reference these constants instead
//! of defining their own magic numbers.

// =============================================================================
// POLLING
// =============================================================================

/// Notification poll interval in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 10_000;

/// Capacity of the poller's broadcast event channel.
pub const EVENT_BUS_CAPACITY: usize = 256;

// =============================================================================
// HOVER POPUP
// =============================================================================

/// Delay before a hover triggers the profile fetch, in milliseconds.
pub const HOVER_DELAY_MS: u64 = 1_000;

// =============================================================================
// HTTP
// =============================================================================

/// Default server base URL (local development server).
pub const BASE_URL: &str = "http://localhost:5000";

/// Per-request timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Notifications endpoint path.
pub const NOTIFICATIONS_PATH: &str = "/notifications";

/// Notifications endpoint path on legacy deployments.
pub const LEGACY_NOTIFICATIONS_PATH: &str = "/main/notifications";

/// Translation endpoint path.
pub const TRANSLATE_PATH: &str = "/translate";

// =============================================================================
// TRANSLATION
// =============================================================================

/// Fixed localized string shown when the translation request fails.
pub const TRANSLATE_ERROR_TEXT: &str = "Error: Could not contact server.";
