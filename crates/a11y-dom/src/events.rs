//! Input Events
//!
//! Keyboard and focus events delivered by the host.

use std::time::Instant;

use crate::NodeId;

/// Key value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Character(char),

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Insert,
    Enter, Tab, Escape,

    // Modifiers (not usually received as key events)
    Shift, Control, Alt, Meta,

    Space,

    Unidentified(String),
}

impl Key {
    /// Parse from a `KeyboardEvent.key` string
    pub fn parse(s: &str) -> Self {
        match s {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Backspace" => Self::Backspace,
            "Delete" => Self::Delete,
            "Insert" => Self::Insert,
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            "Shift" => Self::Shift,
            "Control" | "Ctrl" => Self::Control,
            "Alt" => Self::Alt,
            "Meta" => Self::Meta,
            " " | "Space" => Self::Space,
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => Self::Unidentified(s.to_string()),
                }
            }
        }
    }

    /// The `KeyboardEvent.key` string for this key
    pub fn as_key_string(&self) -> String {
        let named = match self {
            Self::Character(c) => return c.to_string(),
            Self::Unidentified(s) => return s.clone(),
            Self::ArrowUp => "ArrowUp",
            Self::ArrowDown => "ArrowDown",
            Self::ArrowLeft => "ArrowLeft",
            Self::ArrowRight => "ArrowRight",
            Self::Home => "Home",
            Self::End => "End",
            Self::PageUp => "PageUp",
            Self::PageDown => "PageDown",
            Self::Backspace => "Backspace",
            Self::Delete => "Delete",
            Self::Insert => "Insert",
            Self::Enter => "Enter",
            Self::Tab => "Tab",
            Self::Escape => "Escape",
            Self::Shift => "Shift",
            Self::Control => "Control",
            Self::Alt => "Alt",
            Self::Meta => "Meta",
            Self::Space => " ",
        };
        named.to_string()
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool, // Cmd on Mac, Win on Windows
}

impl KeyModifiers {
    /// Check if any modifier is pressed
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }

    pub fn shift() -> Self {
        Self { shift: true, ..Self::default() }
    }
}

/// Key-down event
#[derive(Debug, Clone)]
pub struct KeyboardEvent {
    pub key: Key,
    pub modifiers: KeyModifiers,
    /// When the host observed the key press
    pub timestamp: Instant,
    default_prevented: bool,
}

impl KeyboardEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::default(),
            timestamp: Instant::now(),
            default_prevented: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Override the timestamp
    pub fn at(mut self, timestamp: Instant) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Parse a `+`-separated chord such as `Shift+Tab` or `Ctrl+s`.
    ///
    /// Returns `None` for an empty chord.
    pub fn parse_chord(chord: &str) -> Option<Self> {
        let chord = chord.trim();
        if chord.is_empty() {
            return None;
        }
        // A lone "+" is the plus key, not a separator
        if chord == "+" {
            return Some(Self::new(Key::Character('+')));
        }

        let mut modifiers = KeyModifiers::default();
        let mut parts: Vec<&str> = chord.split('+').collect();
        let key = parts.pop().filter(|k| !k.is_empty())?;
        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "shift" => modifiers.shift = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" => modifiers.alt = true,
                "meta" | "cmd" => modifiers.meta = true,
                _ => return None,
            }
        }
        Some(Self::new(Key::parse(key)).with_modifiers(modifiers))
    }

    /// The `KeyboardEvent.key` string
    pub fn key_string(&self) -> String {
        self.key.as_key_string()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Focus event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusEventKind {
    /// Target gained focus (bubbles)
    FocusIn,
    /// Target lost focus (bubbles)
    FocusOut,
}

/// Focus change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusEvent {
    pub kind: FocusEventKind,
    pub target: NodeId,
}

impl FocusEvent {
    pub fn focus_in(target: NodeId) -> Self {
        Self { kind: FocusEventKind::FocusIn, target }
    }

    pub fn focus_out(target: NodeId) -> Self {
        Self { kind: FocusEventKind::FocusOut, target }
    }
}
