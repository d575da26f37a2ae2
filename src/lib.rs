// SPDX-License-Identifier: GPL-3.0-or-later
// keymatch - Key event matching helpers for key-binding editor tests

pub mod config;
pub mod handlers;
pub mod key;
pub mod list;
pub mod logging;

pub use config::{load_fixture, Fixture};
pub use handlers::{has_key, has_key_mod, key_matches};
pub use key::{Key, KeyEvent, Modifiers};
pub use list::KeyEventList;
