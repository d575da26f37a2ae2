// SPDX-License-Identifier: GPL-3.0-or-later
// keymatch - TOML fixtures of recorded key events

use crate::key::KeyEvent;
use crate::list::KeyEventList;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// One recording as written in the fixture: a list of key strings
/// (`["enter", "ctrl-j"]`) or a single comma-separated string (`"enter, ctrl-j"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RecordingDef {
    List(Vec<String>),
    Inline(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FixtureFile {
    recordings: BTreeMap<String, RecordingDef>,
}

/// Named key event recordings loaded from a fixture file.
///
/// ```toml
/// [recordings]
/// accept = ["enter", "return"]
/// save = "ctrl-s, ctrl-shift-s"
/// ```
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    recordings: BTreeMap<String, KeyEventList>,
}

impl Fixture {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: FixtureFile = toml::from_str(content).context("Failed to parse fixture TOML")?;

        let mut recordings = BTreeMap::new();
        for (name, def) in file.recordings {
            let list = match def {
                RecordingDef::List(entries) => entries
                    .iter()
                    .enumerate()
                    .map(|(i, s)| {
                        s.parse::<KeyEvent>()
                            .with_context(|| format!("Invalid key `{}` at recordings.{}[{}]", s, name, i))
                    })
                    .collect::<Result<KeyEventList>>()?,
                RecordingDef::Inline(s) => s
                    .parse::<KeyEventList>()
                    .with_context(|| format!("Invalid key list in recordings.{}", name))?,
            };
            debug!(recording = %name, events = list.len(), "loaded recording");
            recordings.insert(name, list);
        }

        Ok(Self { recordings })
    }

    pub fn recording(&self, name: &str) -> Option<&KeyEventList> {
        self.recordings.get(name)
    }

    /// Recording names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.recordings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.recordings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recordings.is_empty()
    }
}

/// Load a fixture file from disk.
pub fn load_fixture(path: impl AsRef<Path>) -> Result<Fixture> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture: {}", path.display()))?;
    let fixture = Fixture::from_toml_str(&content)
        .with_context(|| format!("Failed to parse fixture: {}", path.display()))?;
    debug!(path = %path.display(), recordings = fixture.len(), "loaded fixture");
    Ok(fixture)
}
