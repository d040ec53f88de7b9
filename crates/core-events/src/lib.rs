//! Abstract key events and the publish/subscribe bus that delivers them.
//!
//! Raw input capture lives outside the engine; whatever produces input hands
//! `KeyEvent`s to a `KeyEventBus`, which offers them to subscribers in
//! registration order until one reports `Propagation::Handled`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use thiserror::Error;
use tracing::trace;

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
        const META = 0b0000_1000;
    }
}

/// Logical key identity. Printable keys carry their char.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

impl KeyCode {
    /// Logical name used in chord strings (`ArrowLeft`, `Backspace`, ...).
    pub fn name(&self) -> String {
        match self {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Escape".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Up => "ArrowUp".to_string(),
            KeyCode::Down => "ArrowDown".to_string(),
            KeyCode::Left => "ArrowLeft".to_string(),
            KeyCode::Right => "ArrowRight".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        let code = match name {
            "Enter" | "Return" => KeyCode::Enter,
            "Escape" | "Esc" => KeyCode::Esc,
            "Backspace" => KeyCode::Backspace,
            "Tab" => KeyCode::Tab,
            "ArrowUp" | "Up" => KeyCode::Up,
            "ArrowDown" | "Down" => KeyCode::Down,
            "ArrowLeft" | "Left" => KeyCode::Left,
            "ArrowRight" | "Right" => KeyCode::Right,
            "Home" => KeyCode::Home,
            "End" => KeyCode::End,
            "Space" => KeyCode::Char(' '),
            "Plus" => KeyCode::Char('+'),
            _ => {
                let mut chars = name.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                KeyCode::Char(c)
            }
        };
        Some(code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("empty key chord")]
    Empty,
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

impl KeyEvent {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified key.
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    /// Printable char (no modifiers).
    pub fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub fn shift(&self) -> bool {
        self.mods.contains(KeyModifiers::SHIFT)
    }
    pub fn alt(&self) -> bool {
        self.mods.contains(KeyModifiers::ALT)
    }
    pub fn ctrl(&self) -> bool {
        self.mods.contains(KeyModifiers::CTRL)
    }
    pub fn meta(&self) -> bool {
        self.mods.contains(KeyModifiers::META)
    }

    /// Parse a chord such as `Shift+Alt+ArrowLeft`, `Ctrl+z` or `a`.
    ///
    /// The last `+`-separated part is the key; the rest are modifiers
    /// (`Ctrl`/`Control`, `Alt`/`Option`, `Shift`, `Meta`/`Cmd`/`Super`).
    /// A literal plus sign is written `Plus`.
    pub fn parse(chord: &str) -> Result<Self, KeyParseError> {
        let chord = chord.trim();
        if chord.is_empty() {
            return Err(KeyParseError::Empty);
        }
        let mut parts: Vec<&str> = chord.split('+').collect();
        let key = parts.pop().filter(|k| !k.is_empty()).ok_or(KeyParseError::Empty)?;
        let mut mods = KeyModifiers::empty();
        for part in parts {
            mods |= match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CTRL,
                "alt" | "option" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                "meta" | "cmd" | "super" => KeyModifiers::META,
                _ => return Err(KeyParseError::UnknownModifier(part.to_string())),
            };
        }
        let code =
            KeyCode::from_name(key).ok_or_else(|| KeyParseError::UnknownKey(key.to_string()))?;
        Ok(Self { code, mods })
    }
}

impl FromStr for KeyEvent {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (KeyModifiers::CTRL, "Ctrl"),
            (KeyModifiers::ALT, "Alt"),
            (KeyModifiers::SHIFT, "Shift"),
            (KeyModifiers::META, "Meta"),
        ] {
            if self.mods.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        match self.code {
            KeyCode::Char('+') => f.write_str("Plus"),
            code => f.write_str(&code.name()),
        }
    }
}

/// Whether a subscriber consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Handled,
    Ignored,
}

/// Receiver of key events.
pub trait KeySubscriber {
    fn on_key(&mut self, event: &KeyEvent) -> Propagation;
}

/// Identifier returned by `KeyEventBus::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered, single-threaded key event bus.
#[derive(Default)]
pub struct KeyEventBus {
    subscribers: Vec<(SubscriptionId, Rc<RefCell<dyn KeySubscriber>>)>,
    next_id: u64,
}

impl fmt::Debug for KeyEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyEventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl KeyEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: Rc<RefCell<dyn KeySubscriber>>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, subscriber));
        trace!(target: "events.bus", id = id.0, subscribers = self.subscribers.len(), "subscribe");
        id
    }

    /// Remove a subscriber. Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        let removed = self.subscribers.len() != before;
        trace!(target: "events.bus", id = id.0, removed, "unsubscribe");
        removed
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Offer `event` to subscribers in order; stop at the first that handles it.
    pub fn publish(&self, event: &KeyEvent) -> Propagation {
        for (id, sub) in &self.subscribers {
            if sub.borrow_mut().on_key(event) == Propagation::Handled {
                trace!(target: "events.bus", id = id.0, key = %event, "handled");
                return Propagation::Handled;
            }
        }
        trace!(target: "events.bus", key = %event, "unhandled");
        Propagation::Ignored
    }
}
