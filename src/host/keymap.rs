//! Key chord parsing and the global navigation binding table.
//!
//! Chords are written like "ctrl+right" or "alt+shift+t" and matched against
//! crossterm key events. The table is consulted before any key reaches a
//! page, so a bound chord switches tabs no matter which page is active.

use std::fmt;
use std::str::FromStr;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::HostError;

pub const DEFAULT_NEXT: &str = "ctrl+right";
pub const DEFAULT_PREVIOUS: &str = "ctrl+left";
pub const DEFAULT_QUIT: &str = "ctrl+c";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    pub key: KeyCode,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyChord {
    /// A chord with no modifiers.
    pub fn plain(key: KeyCode) -> Self {
        Self {
            key,
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
        }
    }

    pub fn ctrl(key: KeyCode) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    /// Match a key event as crossterm reports it.
    ///
    /// Shifted letters arrive uppercase and Shift+Tab arrives as `BackTab`,
    /// so the event is folded back to the lowercase chord form first. Shift is
    /// not compared for `BackTab` or for symbols whose shift is already part
    /// of the character.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let modifiers = event.modifiers;
        let mut shift = modifiers.contains(KeyModifiers::SHIFT);
        let code = match event.code {
            KeyCode::Char(ch) if ch.is_uppercase() => {
                shift = true;
                KeyCode::Char(ch.to_lowercase().next().unwrap_or(ch))
            }
            code => code,
        };
        if code != self.key {
            return false;
        }

        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        let alt = modifiers.contains(KeyModifiers::ALT);
        let meta = modifiers.contains(KeyModifiers::SUPER) || modifiers.contains(KeyModifiers::META);
        let shift_matches = match code {
            KeyCode::BackTab => true,
            KeyCode::Char(ch) if !ch.is_alphabetic() => true,
            _ => shift == self.shift,
        };

        ctrl == self.ctrl && alt == self.alt && meta == self.meta && shift_matches
    }
}

impl FromStr for KeyChord {
    type Err = HostError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parse_key_chord(input).ok_or_else(|| HostError::InvalidKeyBinding {
            binding: input.to_string(),
        })
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            write!(f, "ctrl+")?;
        }
        if self.alt {
            write!(f, "alt+")?;
        }
        if self.shift {
            write!(f, "shift+")?;
        }
        if self.meta {
            write!(f, "meta+")?;
        }
        match self.key {
            KeyCode::Left => write!(f, "left"),
            KeyCode::Right => write!(f, "right"),
            KeyCode::Up => write!(f, "up"),
            KeyCode::Down => write!(f, "down"),
            KeyCode::Home => write!(f, "home"),
            KeyCode::End => write!(f, "end"),
            KeyCode::PageUp => write!(f, "pageup"),
            KeyCode::PageDown => write!(f, "pagedown"),
            KeyCode::Tab => write!(f, "tab"),
            KeyCode::BackTab => write!(f, "backtab"),
            KeyCode::Esc => write!(f, "esc"),
            KeyCode::Enter => write!(f, "enter"),
            KeyCode::Backspace => write!(f, "backspace"),
            KeyCode::Delete => write!(f, "delete"),
            KeyCode::Insert => write!(f, "insert"),
            KeyCode::Char(' ') => write!(f, "space"),
            KeyCode::Char(ch) => write!(f, "{}", ch),
            KeyCode::F(n) => write!(f, "f{}", n),
            other => write!(f, "{:?}", other),
        }
    }
}

pub fn parse_key_chord(input: &str) -> Option<KeyChord> {
    let trimmed = input.trim().to_lowercase();
    if trimmed.is_empty() {
        return None;
    }

    // "ctrl++" binds the plus key itself
    let (head, plus_key) = match trimmed.strip_suffix("++") {
        Some(head) => (head.to_string(), true),
        None => (trimmed, false),
    };

    let parts: Vec<&str> = head.split('+').map(str::trim).collect();
    if !plus_key && parts.iter().any(|part| part.is_empty()) {
        return None;
    }

    let mut chord = KeyChord::plain(KeyCode::Null);
    if plus_key {
        chord.key = KeyCode::Char('+');
    }

    for part in parts.into_iter().filter(|part| !part.is_empty()) {
        match part {
            "ctrl" | "control" => chord.ctrl = true,
            "alt" | "option" => chord.alt = true,
            "shift" => chord.shift = true,
            "meta" | "cmd" | "super" => chord.meta = true,
            key => {
                if chord.key != KeyCode::Null {
                    return None;
                }
                chord.key = parse_key(key)?;
            }
        }
    }

    if chord.key == KeyCode::Null {
        return None;
    }

    Some(chord)
}

fn parse_key(key: &str) -> Option<KeyCode> {
    match key {
        "esc" | "escape" => Some(KeyCode::Esc),
        "enter" | "return" => Some(KeyCode::Enter),
        "tab" => Some(KeyCode::Tab),
        "backtab" => Some(KeyCode::BackTab),
        "space" | "spacebar" => Some(KeyCode::Char(' ')),
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" | "pgup" => Some(KeyCode::PageUp),
        "pagedown" | "pgdn" => Some(KeyCode::PageDown),
        "backspace" => Some(KeyCode::Backspace),
        "delete" | "del" => Some(KeyCode::Delete),
        "insert" | "ins" => Some(KeyCode::Insert),
        _ => {
            if let Some(n) = key.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                return (1..=24).contains(&n).then_some(KeyCode::F(n));
            }
            let mut chars = key.chars();
            let first = chars.next()?;
            if chars.next().is_none() {
                Some(KeyCode::Char(first))
            } else {
                None
            }
        }
    }
}

/// What a globally bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    NextPage,
    PreviousPage,
    Quit,
}

/// Whether a navigation key, after switching tabs, is also delivered to the
/// newly active page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavigationKeyPolicy {
    /// The key is consumed by the host.
    #[default]
    Consume,
    /// The key is forwarded to the page that became active.
    Forward,
}

/// Global key bindings checked before page routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    next: KeyChord,
    previous: KeyChord,
    quit: Option<KeyChord>,
    policy: NavigationKeyPolicy,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            next: KeyChord::ctrl(KeyCode::Right),
            previous: KeyChord::ctrl(KeyCode::Left),
            quit: Some(KeyChord::ctrl(KeyCode::Char('c'))),
            policy: NavigationKeyPolicy::Consume,
        }
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self) -> &KeyChord {
        &self.next
    }

    pub fn previous(&self) -> &KeyChord {
        &self.previous
    }

    pub fn quit(&self) -> Option<&KeyChord> {
        self.quit.as_ref()
    }

    pub fn policy(&self) -> NavigationKeyPolicy {
        self.policy
    }

    /// Replace the next-page binding.
    pub fn set_next(&mut self, chord: KeyChord) {
        self.next = chord;
    }

    /// Replace the previous-page binding.
    pub fn set_previous(&mut self, chord: KeyChord) {
        self.previous = chord;
    }

    /// Replace or clear the quit binding.
    pub fn set_quit(&mut self, chord: Option<KeyChord>) {
        self.quit = chord;
    }

    pub fn set_policy(&mut self, policy: NavigationKeyPolicy) {
        self.policy = policy;
    }

    /// Map a key event to a global action, if it is bound.
    ///
    /// Quit is checked first, then next, then previous.
    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        if self.quit.as_ref().is_some_and(|chord| chord.matches(key)) {
            Some(KeyAction::Quit)
        } else if self.next.matches(key) {
            Some(KeyAction::NextPage)
        } else if self.previous.matches(key) {
            Some(KeyAction::PreviousPage)
        } else {
            None
        }
    }
}
