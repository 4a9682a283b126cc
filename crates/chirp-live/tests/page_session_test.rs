//! End-to-end test of the three behaviors wired the way a page embeds them.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use chirp_client::MockApi;
use chirp_core::{MessageCountView, Notification, PopupView, SharedText, TextSlot};
use chirp_live::{
    HoverConfig, HoverPhase, HoverSession, NotificationPoller, PollState, PollerConfig,
    TranslationOutcome, Translator, UnreadMessageCountHandler,
};

#[derive(Default)]
struct Counter {
    value: AtomicI64,
}

impl MessageCountView for Counter {
    fn set_message_count(&self, count: i64) {
        self.value.store(count, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct Popover {
    shown: AtomicI64,
}

impl PopupView for Popover {
    fn show(&self, _html: &str) {
        self.shown.fetch_add(1, Ordering::SeqCst);
    }

    fn destroy(&self) {
        self.shown.fetch_sub(1, Ordering::SeqCst);
    }
}

#[tokio::test(start_paused = true)]
async fn test_poller_drives_counter_over_successive_ticks() {
    let api = MockApi::new()
        .with_batch(vec![Notification {
            name: "unread_message_count".to_string(),
            data: json!(3),
            timestamp: 100.0,
        }])
        .with_batch(vec![Notification {
            name: "unread_message_count".to_string(),
            data: json!(0),
            timestamp: 200.0,
        }]);

    let counter = Arc::new(Counter::default());
    let poller = NotificationPoller::new(
        Arc::new(api),
        PollerConfig::default(),
        PollState::default(),
    );
    poller
        .register_handler(UnreadMessageCountHandler::new(counter.clone()))
        .await;

    let handle = poller.start();

    tokio::time::advance(Duration::from_millis(10_000)).await;
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
    assert_eq!(counter.value.load(Ordering::SeqCst), 3);
    assert_eq!(handle.cursor(), 100.0);

    tokio::time::advance(Duration::from_millis(10_000)).await;
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
    assert_eq!(counter.value.load(Ordering::SeqCst), 0);
    assert_eq!(handle.cursor(), 200.0);

    handle.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_behaviors_are_independent() {
    let api = Arc::new(
        MockApi::new()
            .with_translation("good morning")
            .with_popup_html("susan", "<div>susan</div>"),
    );

    // A hover session mid-flight does not disturb a translation, and vice
    // versa.
    let popover = Arc::new(Popover::default());
    let session = HoverSession::new(
        api.clone(),
        popover.clone(),
        "susan",
        HoverConfig::default(),
    );
    session.hover_enter();

    let translator = Translator::new(api.clone());
    let slot = SharedText::new("guten morgen");
    let outcome = translator
        .translate_in_place(&slot, "guten morgen", "de", "en")
        .await;
    assert_eq!(outcome, TranslationOutcome::Applied);
    assert_eq!(slot.text(), "good morning");

    tokio::time::advance(Duration::from_millis(1_000)).await;
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
    assert_eq!(session.phase(), HoverPhase::Shown);
    assert_eq!(popover.shown.load(Ordering::SeqCst), 1);

    session.hover_exit();
    assert_eq!(popover.shown.load(Ordering::SeqCst), 0);
    assert_eq!(slot.text(), "good morning");
}
