mod common;

use common::{key, press_at, type_text};
use core_actions::Session;
use core_events::{KeyEvent, KeyEventBus, KeySubscriber, Propagation};
use core_model::SentenceUnit;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Default)]
struct Recorder {
    seen: Vec<KeyEvent>,
}

impl KeySubscriber for Recorder {
    fn on_key(&mut self, event: &KeyEvent) -> Propagation {
        self.seen.push(*event);
        Propagation::Ignored
    }
}

#[test]
fn bus_delivers_bound_keys_to_session() {
    let session = Rc::new(RefCell::new(Session::new("")));
    let mut bus = KeyEventBus::new();
    bus.subscribe(session.clone());
    for c in "Hi.".chars() {
        assert_eq!(bus.publish(&KeyEvent::char(c)), Propagation::Handled);
    }
    assert_eq!(session.borrow().view().text, "Hi.");
}

#[test]
fn unbound_keys_fall_through_to_later_subscribers() {
    let session = Rc::new(RefCell::new(Session::new("abc")));
    let recorder = Rc::new(RefCell::new(Recorder::default()));
    let mut bus = KeyEventBus::new();
    bus.subscribe(session.clone());
    bus.subscribe(recorder.clone());

    assert_eq!(bus.publish(&key("Ctrl+q")), Propagation::Ignored);
    assert_eq!(bus.publish(&key("ArrowRight")), Propagation::Handled);
    assert_eq!(recorder.borrow().seen, vec![key("Ctrl+q")]);
    assert_eq!(session.borrow().view().cursor, 1);
}

#[test]
fn unsubscribed_session_stops_receiving() {
    let session = Rc::new(RefCell::new(Session::new("")));
    let mut bus = KeyEventBus::new();
    let id = bus.subscribe(session.clone());
    bus.publish(&KeyEvent::char('a'));
    assert!(bus.unsubscribe(id));
    assert!(bus.is_empty());
    assert_eq!(bus.publish(&KeyEvent::char('b')), Propagation::Ignored);
    assert_eq!(session.borrow().view().text, "a");
}

#[test]
fn session_from_config_uses_file_limits() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("quill.toml");
    std::fs::write(&path, "[history]\nbatch_window_ms = 50\nmax_depth = 3\n")?;
    let config = core_config::load_from(Some(path))?;
    let mut s = Session::from_config("", &config);

    let t0 = Instant::now();
    // 100 ms apart: outside a 50 ms window, so every char is its own entry.
    type_text(&mut s, "abcde", t0, 100);
    assert_eq!(s.model().state().undo_depth(), 3);
    assert_eq!(
        s.model().state().history_limits().batch_window,
        Duration::from_millis(50)
    );
    Ok(())
}

#[test]
fn session_from_missing_config_uses_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = core_config::load_from(Some(dir.path().join("absent.toml")))?;
    let mut s = Session::from_config("", &config);
    type_text(&mut s, "abc", Instant::now(), 100);
    assert_eq!(s.model().state().undo_depth(), 1);
    Ok(())
}

#[test]
fn settle_reports_units_with_commit_flags() {
    let mut s = Session::new("One. Two.");
    press_at(
        &mut s,
        &["Ctrl+ArrowRight", "ArrowRight", "Ctrl+Enter"],
        Instant::now(),
        1_000,
    );
    assert_eq!(
        s.settle(),
        vec![
            SentenceUnit {
                text: "One. ".to_string(),
                committed: false
            },
            SentenceUnit {
                text: "Two.".to_string(),
                committed: true
            },
        ]
    );
}
