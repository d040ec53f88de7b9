mod common;

use common::{key, one, press, type_text};
use core_actions::Session;
use core_text::CharRange;
use pretty_assertions::assert_eq;
use std::time::{Duration, Instant};

#[test]
fn parse_two_sentences() {
    let session = Session::new("Hello world. Goodbye.");
    let view = session.view();
    let spans: Vec<(usize, usize)> = view.ast.sentences.iter().map(|s| (s.start, s.end)).collect();
    assert_eq!(spans, vec![(0, 12), (13, 21)]);
}

#[test]
fn word_right_twice() {
    let mut s = Session::new("cat dog");
    press(&mut s, &["Alt+ArrowRight"]);
    assert_eq!(s.view().cursor, 4);
    press(&mut s, &["Alt+ArrowRight"]);
    assert_eq!(s.view().cursor, 7);
}

#[test]
fn reorder_committed_sentence_down() {
    let mut s = Session::new("A. B. C.");
    // Caret to the start of sentence 1 and commit it.
    press(&mut s, &["Ctrl+ArrowRight", "ArrowRight", "Ctrl+Enter"]);
    assert_eq!(s.view().committed_sentences, vec![1]);
    press(&mut s, &["Shift+Alt+ArrowRight"]);
    assert_eq!(s.view().sentence_selection.map(|sel| sel.bounds()), Some((1, 1)));
    press(&mut s, &["ArrowDown"]);
    let view = s.view();
    assert_eq!(view.text, "A. C. B.");
    assert_eq!(view.committed_sentences, vec![2]);
    assert_eq!(view.sentence_selection.map(|sel| sel.bounds()), Some((2, 2)));
    assert_eq!(view.cursor, 6);
}

#[test]
fn typing_into_committed_selection_leaves_ghost() {
    let mut s = Session::new("Pick one.");
    press(&mut s, &["Ctrl+Enter"]);
    // Caret after "Pick", select "one".
    let now = press(&mut s, &["Alt+ArrowRight", "Shift+ArrowRight"]);
    assert_eq!(s.view().word_selection_range(), Some(CharRange::new(5, 8)));
    type_text(&mut s, "two", now, 10);
    let view = s.view();
    assert_eq!(view.text, "Pick one two.");
    assert_eq!(view.ghost_texts(), vec!["one ".to_string()]);
    assert_eq!(view.cursor, 12);
    assert!(view.is_committed(0));
    // Typed chars are never ghosted.
    for pos in 9..12 {
        assert!(!view.is_ghost(pos));
    }
}

#[test]
fn quick_typing_then_backspace_undoes_in_two_steps() {
    let mut s = Session::new("");
    let t0 = Instant::now();
    let after = type_text(&mut s, "hello", t0, 50);
    one(&mut s, "Backspace", after);
    assert_eq!(s.view().text, "hell");
    one(&mut s, "Ctrl+z", after + Duration::from_millis(10));
    assert_eq!(s.view().text, "hello");
    one(&mut s, "Ctrl+z", after + Duration::from_millis(20));
    assert_eq!(s.view().text, "");
    assert!(!one(&mut s, "Ctrl+z", after + Duration::from_millis(30)).dirty);
}

#[test]
fn confirm_ghosts_removes_replaced_text() {
    let mut s = Session::new("Pick one.");
    let now = press(&mut s, &["Ctrl+Enter", "Alt+ArrowRight", "Shift+ArrowRight"]);
    let now = type_text(&mut s, "two", now, 10);
    one(&mut s, "Ctrl+Shift+Enter", now);
    let view = s.view();
    assert_eq!(view.text, "Pick two.");
    assert!(view.ghost_ranges.is_empty());
    assert_eq!(view.cursor, 8);
    assert_eq!(view.committed_sentences, vec![0]);
}

#[test]
fn selection_delete_via_backspace_takes_precedence() {
    let mut s = Session::new("A. B. C.");
    press(&mut s, &["Shift+Ctrl+ArrowRight"]);
    assert_eq!(s.view().sentence_selection.map(|sel| sel.bounds()), Some((0, 0)));
    press(&mut s, &["Alt+Backspace"]);
    assert_eq!(s.view().text, " B. C.");
    assert_eq!(s.view().cursor, 0);
    assert!(s.view().sentence_selection.is_none());
}

#[test]
fn unbound_keys_are_reported() {
    let mut s = Session::new("abc");
    assert!(s.handle_key(&key("Ctrl+q")).is_none());
    assert_eq!(s.view().text, "abc");
}
