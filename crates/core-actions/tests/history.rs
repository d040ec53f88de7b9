mod common;

use common::{one, press_at, type_text};
use core_actions::Session;
use core_state::HistoryLimits;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::subscriber::{Interest, with_default};
use tracing::{Metadata, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;

#[derive(Clone, Default)]
struct MessageCapture {
    events: Arc<Mutex<Vec<(String, String)>>>,
}

struct MessageVisitor<'a>(&'a mut String);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{value:?}");
        }
    }
}

impl<S> Layer<S> for MessageCapture
where
    S: Subscriber,
{
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::always()
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));
        self.events
            .lock()
            .unwrap()
            .push((event.metadata().target().to_string(), message));
    }
}

#[test]
fn two_inserts_within_window_share_one_snapshot() {
    let mut s = Session::new("");
    let t0 = Instant::now();
    type_text(&mut s, "ab", t0, 100);
    assert_eq!(s.model().state().undo_depth(), 1);
}

#[test]
fn inserts_separated_by_window_take_two_snapshots() {
    let mut s = Session::new("");
    let t0 = Instant::now();
    type_text(&mut s, "ab", t0, 500);
    assert_eq!(s.model().state().undo_depth(), 2);
}

#[test]
fn forced_operation_splits_a_burst() {
    let mut s = Session::new("");
    let t0 = Instant::now();
    type_text(&mut s, "ab", t0, 10);
    one(&mut s, "Enter", t0 + Duration::from_millis(30));
    type_text(&mut s, "c", t0 + Duration::from_millis(40), 10);
    assert_eq!(s.view().text, "ab\nc");
    assert_eq!(s.model().state().undo_depth(), 3);
    one(&mut s, "Ctrl+z", t0 + Duration::from_millis(60));
    assert_eq!(s.view().text, "ab\n");
    one(&mut s, "Ctrl+z", t0 + Duration::from_millis(70));
    assert_eq!(s.view().text, "ab");
    one(&mut s, "Ctrl+z", t0 + Duration::from_millis(80));
    assert_eq!(s.view().text, "");
}

#[test]
fn typing_over_a_selection_is_one_group() {
    let mut s = Session::new("Pick one.");
    let now = press_at(&mut s, &["Alt+ArrowRight", "Shift+ArrowRight"], Instant::now(), 1_000);
    type_text(&mut s, "two", now, 10);
    assert_eq!(s.view().text, "Pick two.");
    assert_eq!(s.model().state().undo_depth(), 1);
    one(&mut s, "Ctrl+z", now + Duration::from_secs(1));
    assert_eq!(s.view().text, "Pick one.");
}

#[test]
fn typing_over_a_committed_selection_is_one_group() {
    let mut s = Session::new("Pick one.");
    let now = press_at(
        &mut s,
        &["Ctrl+Enter", "Alt+ArrowRight", "Shift+ArrowRight"],
        Instant::now(),
        1_000,
    );
    let depth = s.model().state().undo_depth();
    type_text(&mut s, "two", now, 10);
    assert_eq!(s.view().text, "Pick one two.");
    assert_eq!(s.model().state().undo_depth(), depth + 1);
    one(&mut s, "Ctrl+z", now + Duration::from_secs(1));
    let view = s.view();
    assert_eq!(view.text, "Pick one.");
    assert!(view.ghost_ranges.is_empty());
    assert_eq!(view.committed_sentences, vec![0]);
}

#[test]
fn undo_redo_round_trip_restores_everything() {
    let mut s = Session::new("One. Two. Three.");
    let t0 = Instant::now();
    let t = press_at(
        &mut s,
        &["Ctrl+Enter", "Ctrl+ArrowRight", "ArrowRight", "Shift+Alt+ArrowRight"],
        t0,
        1_000,
    );
    let before = s.view();
    press_at(&mut s, &["ArrowDown"], t, 1_000);
    let after = s.view();
    assert_eq!(after.text, "One. Three. Two.");

    one(&mut s, "Ctrl+z", t + Duration::from_secs(2));
    let undone = s.view();
    assert_eq!(undone.text, before.text);
    assert_eq!(undone.committed_sentences, before.committed_sentences);
    assert_eq!(undone.cursor, before.cursor);
    assert!(undone.sentence_selection.is_none());

    one(&mut s, "Ctrl+Shift+z", t + Duration::from_secs(3));
    let redone = s.view();
    assert_eq!(redone.text, after.text);
    assert_eq!(redone.committed_sentences, after.committed_sentences);
    assert_eq!(redone.cursor, after.cursor);
}

#[test]
fn divergent_edit_clears_redo() {
    let mut s = Session::new("");
    let t0 = Instant::now();
    type_text(&mut s, "a", t0, 10);
    one(&mut s, "Ctrl+z", t0 + Duration::from_millis(20));
    assert_eq!(s.model().state().redo_depth(), 1);
    type_text(&mut s, "b", t0 + Duration::from_millis(30), 10);
    assert_eq!(s.model().state().redo_depth(), 0);
    assert!(!one(&mut s, "Ctrl+y", t0 + Duration::from_millis(40)).dirty);
    assert_eq!(s.view().text, "b");
}

#[test]
fn typing_after_undo_starts_a_new_group() {
    let mut s = Session::new("");
    let t0 = Instant::now();
    type_text(&mut s, "ab", t0, 10);
    one(&mut s, "Ctrl+z", t0 + Duration::from_millis(30));
    type_text(&mut s, "cd", t0 + Duration::from_millis(40), 10);
    assert_eq!(s.view().text, "cd");
    one(&mut s, "Ctrl+z", t0 + Duration::from_millis(70));
    assert_eq!(s.view().text, "");
}

#[test]
fn configured_depth_caps_history() {
    let mut s = Session::with_limits(
        "",
        HistoryLimits {
            batch_window: Duration::from_millis(500),
            max_depth: 2,
        },
    );
    let t0 = Instant::now();
    type_text(&mut s, "abcd", t0, 1_000);
    assert_eq!(s.model().state().undo_depth(), 2);
    one(&mut s, "Ctrl+z", t0 + Duration::from_secs(10));
    one(&mut s, "Ctrl+z", t0 + Duration::from_secs(11));
    assert_eq!(s.view().text, "ab");
}

#[test]
fn history_events_use_state_undo_target() {
    let capture = MessageCapture::default();
    let events = capture.events.clone();
    let subscriber = Registry::default().with(capture);
    with_default(subscriber, || {
        let mut s = Session::new("");
        let t0 = Instant::now();
        type_text(&mut s, "ab", t0, 10);
        one(&mut s, "Ctrl+z", t0 + Duration::from_millis(50));
    });
    let events = events.lock().unwrap();
    let undo: Vec<&str> = events
        .iter()
        .filter(|(target, _)| target == "state.undo")
        .map(|(_, msg)| msg.as_str())
        .collect();
    assert!(undo.contains(&"push_snapshot"), "{undo:?}");
    assert!(undo.contains(&"snapshot_absorbed"), "{undo:?}");
    assert!(undo.contains(&"undo_pop"), "{undo:?}");
    assert!(events.iter().any(|(target, _)| target == "actions.dispatch"));
}
