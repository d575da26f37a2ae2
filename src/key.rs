// SPDX-License-Identifier: GPL-3.0-or-later
// keymatch - Key codes, modifier masks and recorded key events

use anyhow::{bail, Result};
use crossterm::event::{
    KeyCode as TermKeyCode, KeyEvent as TermKeyEvent, KeyEventState, KeyModifiers,
};
use std::fmt;
use std::str::FromStr;

/// Highest function key number with a code of its own.
const MAX_FUNCTION_KEY: u8 = 35;

/// Integer key code.
///
/// Printable keys use the code point of their uppercase form (`A` is 65),
/// special keys live at `0x0100_0000` and above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(pub i32);

impl Key {
    pub const SPACE: Key = Key(0x20);
    pub const ESCAPE: Key = Key(0x0100_0000);
    pub const TAB: Key = Key(0x0100_0001);
    pub const BACKSPACE: Key = Key(0x0100_0003);
    pub const RETURN: Key = Key(0x0100_0004);
    pub const ENTER: Key = Key(0x0100_0005);
    pub const INSERT: Key = Key(0x0100_0006);
    pub const DELETE: Key = Key(0x0100_0007);
    pub const HOME: Key = Key(0x0100_0010);
    pub const END: Key = Key(0x0100_0011);
    pub const LEFT: Key = Key(0x0100_0012);
    pub const UP: Key = Key(0x0100_0013);
    pub const RIGHT: Key = Key(0x0100_0014);
    pub const DOWN: Key = Key(0x0100_0015);
    pub const PAGE_UP: Key = Key(0x0100_0016);
    pub const PAGE_DOWN: Key = Key(0x0100_0017);
    pub const F1: Key = Key(0x0100_0030);
    pub const UNKNOWN: Key = Key(0x01ff_ffff);

    pub const fn code(self) -> i32 {
        self.0
    }

    /// Key for a printable character. Letters fold to their uppercase code.
    pub fn from_char(c: char) -> Key {
        let mut upper = c.to_uppercase();
        let folded = match (upper.next(), upper.next()) {
            (Some(u), None) => u,
            _ => c,
        };
        Key(folded as i32)
    }

    /// `F1` through `F35`.
    pub const fn function(n: u8) -> Option<Key> {
        if n == 0 || n > MAX_FUNCTION_KEY {
            return None;
        }
        Some(Key(Self::F1.0 + n as i32 - 1))
    }

    pub fn function_number(self) -> Option<u8> {
        let offset = self.0.checked_sub(Self::F1.0)?;
        u8::try_from(offset + 1)
            .ok()
            .filter(|n| (1..=MAX_FUNCTION_KEY).contains(n))
    }

    /// Printable character for this code, if it has one.
    pub fn as_char(self) -> Option<char> {
        if self.0 >= Self::ESCAPE.0 {
            return None;
        }
        u32::try_from(self.0)
            .ok()
            .and_then(char::from_u32)
            .filter(|c| !c.is_control())
    }

    fn special_name(self) -> Option<&'static str> {
        let name = match self {
            Key::SPACE => "Space",
            Key::ESCAPE => "Esc",
            Key::TAB => "Tab",
            Key::BACKSPACE => "Backspace",
            Key::RETURN => "Return",
            Key::ENTER => "Enter",
            Key::INSERT => "Insert",
            Key::DELETE => "Delete",
            Key::HOME => "Home",
            Key::END => "End",
            Key::LEFT => "←",
            Key::UP => "↑",
            Key::RIGHT => "→",
            Key::DOWN => "↓",
            Key::PAGE_UP => "PgUp",
            Key::PAGE_DOWN => "PgDown",
            _ => return None,
        };
        Some(name)
    }
}

impl From<i32> for Key {
    fn from(code: i32) -> Self {
        Key(code)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Key::from_char(c)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.special_name() {
            return f.write_str(name);
        }
        if let Some(n) = self.function_number() {
            return write!(f, "F{}", n);
        }
        match self.as_char() {
            Some(c) => write!(f, "{}", c),
            None => write!(f, "{:#x}", self.0),
        }
    }
}

bitflags::bitflags! {
    /// Modifier bitmask active during a key press. Empty means no modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const SHIFT   = 0x0200_0000;
        const CONTROL = 0x0400_0000;
        const ALT     = 0x0800_0000;
        const META    = 0x1000_0000;
        const KEYPAD  = 0x2000_0000;

        // Raw masks from recordings keep every bit.
        const _ = !0;
    }
}

impl From<u32> for Modifiers {
    fn from(bits: u32) -> Self {
        Modifiers::from_bits_retain(bits)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMED: [(Modifiers, &str); 5] = [
            (Modifiers::CONTROL, "Ctrl"),
            (Modifiers::ALT, "Alt"),
            (Modifiers::SHIFT, "Shift"),
            (Modifiers::META, "Meta"),
            (Modifiers::KEYPAD, "Keypad"),
        ];

        let mut parts: Vec<String> = NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| name.to_string())
            .collect();

        let named_bits = NAMED.iter().fold(0, |acc, (flag, _)| acc | flag.bits());
        let rest = self.bits() & !named_bits;
        if rest != 0 {
            parts.push(format!("{:#x}", rest));
        }

        f.write_str(&parts.join("+"))
    }
}

/// A recorded key press: key code plus the exact modifier mask held at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: impl Into<Key>, modifiers: impl Into<Modifiers>) -> Self {
        Self {
            key: key.into(),
            modifiers: modifiers.into(),
        }
    }

    /// Key press with no modifiers held.
    pub fn plain(key: impl Into<Key>) -> Self {
        Self::new(key, Modifiers::empty())
    }

    /// Combined code (key + modifier flags), the form key-binding editors
    /// use to address a single binding.
    pub fn key_code(&self) -> i64 {
        i64::from(self.key.0) + i64::from(self.modifiers.bits())
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}

fn parse_modifier(token: &str) -> Option<Modifiers> {
    let flag = match token {
        "ctrl" | "control" => Modifiers::CONTROL,
        "alt" => Modifiers::ALT,
        "shift" => Modifiers::SHIFT,
        "meta" | "super" => Modifiers::META,
        "keypad" | "kp" => Modifiers::KEYPAD,
        _ => return None,
    };
    Some(flag)
}

fn parse_key_token(token: &str) -> Option<Key> {
    let key = match token {
        "enter" => Key::ENTER,
        "return" => Key::RETURN,
        "esc" | "escape" => Key::ESCAPE,
        "backspace" => Key::BACKSPACE,
        "tab" => Key::TAB,
        "insert" | "ins" => Key::INSERT,
        "delete" | "del" => Key::DELETE,
        "space" => Key::SPACE,
        "home" => Key::HOME,
        "end" => Key::END,
        "pageup" | "pgup" => Key::PAGE_UP,
        "pagedown" | "pgdn" => Key::PAGE_DOWN,
        "up" => Key::UP,
        "down" => Key::DOWN,
        "left" => Key::LEFT,
        "right" => Key::RIGHT,
        "comma" => Key::from_char(','),
        "minus" => Key::from_char('-'),
        _ => {
            let mut chars = token.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Some(Key::from_char(c)),
                _ => token
                    .strip_prefix('f')
                    .and_then(|n| n.parse::<u8>().ok())
                    .and_then(Key::function),
            };
        }
    };
    Some(key)
}

/// Parses the dash-separated form, e.g. `"ctrl-s"`, `"shift-alt-f4"`, `"enter"`.
/// `"ctrl--"` is Ctrl with the minus key.
impl FromStr for KeyEvent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_lowercase();
        if s.is_empty() {
            bail!("empty key string");
        }

        let (mod_part, key_part) = if s == "-" {
            (None, "-")
        } else if let Some(rest) = s.strip_suffix("--") {
            (Some(rest), "-")
        } else {
            match s.rsplit_once('-') {
                Some((mods, key)) => (Some(mods), key),
                None => (None, s.as_str()),
            }
        };

        if key_part.is_empty() {
            bail!("missing key in `{}`", s);
        }

        let mut modifiers = Modifiers::empty();
        if let Some(mods) = mod_part {
            for token in mods.split('-') {
                match parse_modifier(token) {
                    Some(flag) => modifiers.insert(flag),
                    None => bail!("unknown modifier `{}` in `{}`", token, s),
                }
            }
        }

        let Some(key) = parse_key_token(key_part) else {
            bail!("unknown key `{}` in `{}`", key_part, s);
        };

        Ok(KeyEvent { key, modifiers })
    }
}

impl From<TermKeyEvent> for KeyEvent {
    fn from(event: TermKeyEvent) -> Self {
        let key = match event.code {
            TermKeyCode::Char(c) => Key::from_char(c),
            TermKeyCode::Enter => Key::RETURN,
            TermKeyCode::Esc => Key::ESCAPE,
            TermKeyCode::Backspace => Key::BACKSPACE,
            TermKeyCode::Tab | TermKeyCode::BackTab => Key::TAB,
            TermKeyCode::Insert => Key::INSERT,
            TermKeyCode::Delete => Key::DELETE,
            TermKeyCode::Home => Key::HOME,
            TermKeyCode::End => Key::END,
            TermKeyCode::Left => Key::LEFT,
            TermKeyCode::Up => Key::UP,
            TermKeyCode::Right => Key::RIGHT,
            TermKeyCode::Down => Key::DOWN,
            TermKeyCode::PageUp => Key::PAGE_UP,
            TermKeyCode::PageDown => Key::PAGE_DOWN,
            TermKeyCode::F(n) => Key::function(n).unwrap_or(Key::UNKNOWN),
            _ => Key::UNKNOWN,
        };

        let mut modifiers = Modifiers::empty();
        if event.modifiers.contains(KeyModifiers::SHIFT) || event.code == TermKeyCode::BackTab {
            modifiers.insert(Modifiers::SHIFT);
        }
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            modifiers.insert(Modifiers::CONTROL);
        }
        if event.modifiers.contains(KeyModifiers::ALT) {
            modifiers.insert(Modifiers::ALT);
        }
        if event.modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META) {
            modifiers.insert(Modifiers::META);
        }
        if event.state.contains(KeyEventState::KEYPAD) {
            modifiers.insert(Modifiers::KEYPAD);
        }

        KeyEvent { key, modifiers }
    }
}
