#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, Session};
use core_events::KeyEvent;
use std::time::{Duration, Instant};

pub fn key(chord: &str) -> KeyEvent {
    KeyEvent::parse(chord).unwrap_or_else(|e| panic!("bad chord {chord:?}: {e}"))
}

/// Feed chords `step_ms` apart starting at `base`. Returns the instant after the last key.
pub fn press_at(session: &mut Session, chords: &[&str], base: Instant, step_ms: u64) -> Instant {
    let mut now = base;
    for chord in chords {
        session.handle_key_at(&key(chord), now);
        now += Duration::from_millis(step_ms);
    }
    now
}

/// Feed chords far enough apart that no two share a history group.
pub fn press(session: &mut Session, chords: &[&str]) -> Instant {
    press_at(session, chords, Instant::now(), 1_000)
}

/// Type `text` one char per key, `step_ms` apart.
pub fn type_text(session: &mut Session, text: &str, base: Instant, step_ms: u64) -> Instant {
    let mut now = base;
    for c in text.chars() {
        session.handle_key_at(&KeyEvent::char(c), now);
        now += Duration::from_millis(step_ms);
    }
    now
}

pub fn one(session: &mut Session, chord: &str, now: Instant) -> DispatchResult {
    session
        .handle_key_at(&key(chord), now)
        .unwrap_or_else(|| panic!("{chord} is unbound"))
}
