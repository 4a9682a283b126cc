//! # chirp-client
//!
//! HTTP implementation of the chirp server contract, plus a deterministic
//! mock for tests.
//!
//! ## Example
//!
//! ```ignore
//! use chirp_client::{HttpApi, HttpConfig};
//!
//! let api = HttpApi::new(HttpConfig::from_env())?;
//! let batch = api.notifications(0.0).await?;
//! ```

pub mod http;
pub mod mock;

pub use http::{HttpApi, HttpConfig};
pub use mock::{MockApi, MockCall};

// Re-export core types
pub use chirp_core::{ApiClient, Notification, TranslateRequest};
