//! Translation trigger with an optimistic-concurrency guard.
//!
//! The displayed text is the source of truth for "am I still relevant": the
//! text is captured at invocation time, and the response is only applied if
//! that captured text still equals the caller's assumed original. A response
//! that lost the race restores the original instead.

use std::sync::Arc;

use tracing::debug;

use chirp_core::{defaults, ApiClient, TextSlot, TranslateRequest};

/// What a translation round did to the displayed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// The translated text was applied.
    Applied,
    /// The displayed text had moved on; the original was restored and the
    /// response discarded.
    Superseded,
    /// The request failed; the fixed error string was applied.
    Failed,
}

/// On-demand translation of one displayed text.
pub struct Translator {
    api: Arc<dyn ApiClient>,
    error_text: String,
}

impl Translator {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self {
            api,
            error_text: defaults::TRANSLATE_ERROR_TEXT.to_string(),
        }
    }

    /// Override the localized string shown when the request fails.
    pub fn with_error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = text.into();
        self
    }

    /// Translate the slot's text and swap it in place.
    ///
    /// `original_text` is the text the caller believes the slot displays.
    /// The currently displayed text is captured before the request goes out;
    /// it is both what gets submitted for translation and what the guard
    /// compares against `original_text` when the response lands. On a
    /// mismatch the original is restored and the response wasted.
    pub async fn translate_in_place(
        &self,
        slot: &dyn TextSlot,
        original_text: &str,
        source_language: &str,
        destination_language: &str,
    ) -> TranslationOutcome {
        let current_text = slot.text();

        let result = self
            .api
            .translate(TranslateRequest {
                text: current_text.clone(),
                source_language: source_language.to_string(),
                destination_language: destination_language.to_string(),
            })
            .await;

        match result {
            Ok(translated) => {
                if current_text == original_text {
                    slot.set_text(&translated);
                    TranslationOutcome::Applied
                } else {
                    debug!(
                        op = "translate",
                        "Displayed text moved on, discarding translation"
                    );
                    slot.set_text(original_text);
                    TranslationOutcome::Superseded
                }
            }
            Err(e) => {
                debug!(op = "translate", error = %e, "Translation request failed");
                if current_text == original_text {
                    slot.set_text(&self.error_text);
                    TranslationOutcome::Failed
                } else {
                    slot.set_text(original_text);
                    TranslationOutcome::Superseded
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_client::MockApi;
    use chirp_core::SharedText;

    #[tokio::test]
    async fn test_translation_applied_when_text_unchanged() {
        let api = MockApi::new().with_translation("hello world");
        let translator = Translator::new(Arc::new(api.clone()));
        let slot = SharedText::new("hallo welt");

        let outcome = translator
            .translate_in_place(&slot, "hallo welt", "de", "en")
            .await;

        assert_eq!(outcome, TranslationOutcome::Applied);
        assert_eq!(slot.text(), "hello world");
        // The displayed text is what was submitted.
        assert_eq!(api.calls()[0].input, "hallo welt");
    }

    #[tokio::test]
    async fn test_stale_caller_state_restores_original() {
        let api = MockApi::new().with_translation("hello world");
        let translator = Translator::new(Arc::new(api));
        let slot = SharedText::new("edited since");

        let outcome = translator
            .translate_in_place(&slot, "hallo welt", "de", "en")
            .await;

        assert_eq!(outcome, TranslationOutcome::Superseded);
        assert_eq!(slot.text(), "hallo welt");
    }

    #[tokio::test]
    async fn test_failure_shows_error_text_when_unchanged() {
        let api = MockApi::new().failing_translate(true);
        let translator = Translator::new(Arc::new(api));
        let slot = SharedText::new("hallo welt");

        let outcome = translator
            .translate_in_place(&slot, "hallo welt", "de", "en")
            .await;

        assert_eq!(outcome, TranslationOutcome::Failed);
        assert_eq!(slot.text(), defaults::TRANSLATE_ERROR_TEXT);
    }

    #[tokio::test]
    async fn test_failure_with_stale_state_restores_original() {
        let api = MockApi::new().failing_translate(true);
        let translator = Translator::new(Arc::new(api));
        let slot = SharedText::new("edited since");

        let outcome = translator
            .translate_in_place(&slot, "hallo welt", "de", "en")
            .await;

        assert_eq!(outcome, TranslationOutcome::Superseded);
        assert_eq!(slot.text(), "hallo welt");
    }

    #[tokio::test]
    async fn test_custom_error_text() {
        let api = MockApi::new().failing_translate(true);
        let translator =
            Translator::new(Arc::new(api)).with_error_text("Fehler: Server nicht erreichbar.");
        let slot = SharedText::new("hallo");

        translator.translate_in_place(&slot, "hallo", "de", "en").await;

        assert_eq!(slot.text(), "Fehler: Server nicht erreichbar.");
    }
}
