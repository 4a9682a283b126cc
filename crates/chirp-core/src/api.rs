//! Server API contract.
//!
//! The server (rendering, auth, the translation backend) is an opaque HTTP
//! service; this trait is everything the client behaviors need from it.
//! The HTTP implementation lives in `chirp-client`, alongside a deterministic
//! mock for tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::notification::Notification;

/// Request for a server-side text translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateRequest {
    /// Text to translate, as currently displayed.
    pub text: String,
    /// Source language code (e.g. "de").
    pub source_language: String,
    /// Destination language code (e.g. "en").
    pub destination_language: String,
}

/// Client-side view of the server.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Fetch notifications newer than `since`, ordered by timestamp ascending.
    async fn notifications(&self, since: f64) -> Result<Vec<Notification>>;

    /// Translate text; returns the translated text.
    async fn translate(&self, request: TranslateRequest) -> Result<String>;

    /// Fetch the profile popup HTML fragment for a user.
    async fn user_popup(&self, username: &str) -> Result<String>;
}
