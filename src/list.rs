// SPDX-License-Identifier: GPL-3.0-or-later
// keymatch - Ordered recordings of key events

use crate::handlers::{has_key, has_key_mod, key_matches};
use crate::key::{Key, KeyEvent, Modifiers};
use anyhow::{Context, Result};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Key events in the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyEventList {
    events: Vec<KeyEvent>,
}

impl KeyEventList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: impl Into<KeyEvent>) {
        self.events.push(event.into());
    }

    pub fn as_slice(&self) -> &[KeyEvent] {
        &self.events
    }

    pub fn has_key(&self, key: impl Into<Key>) -> bool {
        has_key(&self.events, key.into())
    }

    pub fn has_key_mod(&self, key: impl Into<Key>, modifiers: impl Into<Modifiers>) -> bool {
        has_key_mod(&self.events, key.into(), modifiers.into())
    }

    pub fn contains_event(&self, event: KeyEvent) -> bool {
        key_matches(event, &self.events)
    }
}

impl Deref for KeyEventList {
    type Target = [KeyEvent];

    fn deref(&self) -> &[KeyEvent] {
        &self.events
    }
}

impl From<Vec<KeyEvent>> for KeyEventList {
    fn from(events: Vec<KeyEvent>) -> Self {
        Self { events }
    }
}

impl FromIterator<KeyEvent> for KeyEventList {
    fn from_iter<I: IntoIterator<Item = KeyEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl Extend<KeyEvent> for KeyEventList {
    fn extend<I: IntoIterator<Item = KeyEvent>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

impl IntoIterator for KeyEventList {
    type Item = KeyEvent;
    type IntoIter = std::vec::IntoIter<KeyEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeyEventList {
    type Item = &'a KeyEvent;
    type IntoIter = std::slice::Iter<'a, KeyEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// Comma-separated key strings, e.g. `"a, ctrl-s, shift-tab"`.
/// Blank input is an empty list; spell the comma key as `comma`.
impl FromStr for KeyEventList {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Ok(Self::new());
        }
        s.split(',')
            .enumerate()
            .map(|(i, part)| {
                part.parse::<KeyEvent>()
                    .with_context(|| format!("Invalid key at position {}: `{}`", i, part.trim()))
            })
            .collect()
    }
}

impl fmt::Display for KeyEventList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.events.iter().map(|e| e.to_string()).collect();
        f.write_str(&names.join(", "))
    }
}
