//! # chirp-core
//!
//! Core types, traits, and abstractions for the chirp live-update client.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the other chirp crates depend on: the notification wire types, the
//! [`ApiClient`] server contract, and the view traits standing in for the
//! rendered page surface.

pub mod api;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod notification;
pub mod view;

// Re-export commonly used types at crate root
pub use api::{ApiClient, TranslateRequest};
pub use error::{Error, Result};
pub use notification::{Notification, TaskProgress};
pub use view::{MessageCountView, PopupView, SharedText, TaskProgressView, TextSlot};
