// SPDX-License-Identifier: GPL-3.0-or-later
// keymatch - Matching recorded key events against a key and modifier mask

use crate::key::{Key, KeyEvent, Modifiers};
use tracing::trace;

/// Returns true if the event matches any of the given keys (key + modifiers only).
pub fn key_matches(event: KeyEvent, keys: &[KeyEvent]) -> bool {
    keys.iter()
        .any(|k| event.key == k.key && event.modifiers == k.modifiers)
}

/// Returns true if `events` holds an entry with this key and exactly this
/// modifier mask. `Ctrl+Shift+S` does not satisfy a query for `Ctrl+S`.
pub fn has_key_mod(events: &[KeyEvent], key: Key, modifiers: Modifiers) -> bool {
    let found = key_matches(KeyEvent { key, modifiers }, events);
    trace!(%key, modifiers = modifiers.bits(), recorded = events.len(), found, "has_key_mod");
    found
}

/// Same as [`has_key_mod`] with no modifiers held.
pub fn has_key(events: &[KeyEvent], key: Key) -> bool {
    has_key_mod(events, key, Modifiers::empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;

    fn ev(key: i32, modifiers: u32) -> KeyEvent {
        KeyEvent::new(key, modifiers)
    }

    #[test]
    fn test_empty_list_never_matches() {
        init_test_logging();
        let events: Vec<KeyEvent> = Vec::new();
        assert!(!has_key(&events, Key(65)));
        assert!(!has_key_mod(&events, Key(65), Modifiers::from(1u32)));
        assert!(!has_key_mod(&events, Key(0), Modifiers::empty()));
    }

    #[test]
    fn test_single_plain_event() {
        let events = [ev(65, 0)];
        assert!(has_key(&events, Key(65)));
        // modifier mismatch: 0 != 1
        assert!(!has_key_mod(&events, Key(65), Modifiers::from(1u32)));
    }

    #[test]
    fn test_exact_modifier_match() {
        let events = [ev(65, 2), ev(83, 0)];
        assert!(has_key_mod(&events, Key(65), Modifiers::from(2u32)));
        assert!(has_key(&events, Key(83)));
        assert!(!has_key(&events, Key(65)));
    }

    #[test]
    fn test_modifiers_are_not_a_subset_test() {
        let events = [KeyEvent::new('s', Modifiers::CONTROL | Modifiers::SHIFT)];
        let s = Key::from_char('s');
        assert!(!has_key_mod(&events, s, Modifiers::CONTROL));
        assert!(!has_key_mod(&events, s, Modifiers::SHIFT));
        assert!(!has_key(&events, s));
        assert!(has_key_mod(&events, s, Modifiers::CONTROL | Modifiers::SHIFT));

        let events = [KeyEvent::new('s', Modifiers::CONTROL)];
        assert!(!has_key_mod(&events, s, Modifiers::CONTROL | Modifiers::SHIFT));
    }

    #[test]
    fn test_has_key_equals_has_key_mod_with_no_modifiers() {
        let lists = [
            vec![],
            vec![ev(65, 0)],
            vec![ev(65, 2), ev(83, 0)],
            vec![ev(1, 1), ev(1, 0), ev(2, 4)],
        ];
        for events in &lists {
            for key in [0, 1, 2, 65, 83] {
                assert_eq!(
                    has_key(events, Key(key)),
                    has_key_mod(events, Key(key), Modifiers::empty()),
                    "key {} in {:?}",
                    key,
                    events
                );
            }
        }
    }

    #[test]
    fn test_result_does_not_depend_on_order() {
        let events = vec![ev(65, 2), ev(83, 0), ev(0x0100_0004, 0), ev(83, 0x0400_0000)];
        let queries: [(i32, u32); 6] = [(65, 2), (83, 0), (83, 0x0400_0000), (0x0100_0004, 0), (65, 0), (90, 0)];

        let expected: Vec<bool> = queries
            .iter()
            .map(|&(k, m)| has_key_mod(&events, Key(k), Modifiers::from(m)))
            .collect();
        assert_eq!(expected, [true, true, true, true, false, false]);

        let mut permuted = events.clone();
        for _ in 0..events.len() {
            permuted.rotate_left(1);
            let mut reversed = permuted.clone();
            reversed.reverse();
            for perm in [&permuted, &reversed] {
                let got: Vec<bool> = queries
                    .iter()
                    .map(|&(k, m)| has_key_mod(perm, Key(k), Modifiers::from(m)))
                    .collect();
                assert_eq!(got, expected);
            }
        }
    }

    #[test]
    fn test_key_matches_against_bindings() {
        let bindings = [
            KeyEvent::plain(Key::RETURN),
            KeyEvent::plain(Key::ENTER),
            KeyEvent::new('j', Modifiers::CONTROL),
        ];
        assert!(key_matches(KeyEvent::plain(Key::ENTER), &bindings));
        assert!(key_matches(KeyEvent::new('J', Modifiers::CONTROL), &bindings));
        assert!(!key_matches(KeyEvent::plain('j'), &bindings));
        assert!(!key_matches(KeyEvent::plain(Key::RETURN), &[]));
    }
}
