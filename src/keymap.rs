//! Key code to character tables for US-style layouts.
//!
//! The mapping is fixed and deliberately not internationalized: a key resolves through the base
//! table, or the shift table while shift is held, and caps lock only flips the case of a resolved
//! letter afterwards.

use crate::input::event_codes::*;
use crate::modifiers::ModifierState;

const TABLE_LEN: usize = 256;

type Table = [Option<char>; TABLE_LEN];

const fn build(entries: &[(u16, char)]) -> Table {
    let mut table = [None; TABLE_LEN];
    let mut i = 0;

    while i < entries.len() {
        table[entries[i].0 as usize] = Some(entries[i].1);
        i += 1;
    }

    table
}

// Keys that resolve the same regardless of shift.
macro_rules! shared_entries {
    ($($code:expr => $chr:expr),* $(,)?) => {
        [
            $(($code, $chr),)*
            (KEY_BACKSPACE, '\x08'), (KEY_TAB, '\t'), (KEY_ENTER, '\n'), (KEY_SPACE, ' '),
            (KEY_KPASTERISK, '*'), (KEY_KP7, '7'), (KEY_KP8, '8'), (KEY_KP9, '9'),
            (KEY_KPMINUS, '-'), (KEY_KP4, '4'), (KEY_KP5, '5'), (KEY_KP6, '6'),
            (KEY_KPPLUS, '+'), (KEY_KP1, '1'), (KEY_KP2, '2'), (KEY_KP3, '3'),
            (KEY_KP0, '0'), (KEY_KPDOT, '.'), (KEY_KPENTER, '\n'), (KEY_KPSLASH, '/'),
            (KEY_KPEQUAL, '='), (KEY_KPCOMMA, ','), (KEY_KPLEFTPAREN, '('),
            (KEY_KPRIGHTPAREN, ')'),
        ]
    };
}

static BASE: Table = build(&shared_entries![
    KEY_1 => '1', KEY_2 => '2', KEY_3 => '3', KEY_4 => '4', KEY_5 => '5',
    KEY_6 => '6', KEY_7 => '7', KEY_8 => '8', KEY_9 => '9', KEY_0 => '0',
    KEY_MINUS => '-', KEY_EQUAL => '=',
    KEY_Q => 'q', KEY_W => 'w', KEY_E => 'e', KEY_R => 'r', KEY_T => 't',
    KEY_Y => 'y', KEY_U => 'u', KEY_I => 'i', KEY_O => 'o', KEY_P => 'p',
    KEY_LEFTBRACE => '[', KEY_RIGHTBRACE => ']',
    KEY_A => 'a', KEY_S => 's', KEY_D => 'd', KEY_F => 'f', KEY_G => 'g',
    KEY_H => 'h', KEY_J => 'j', KEY_K => 'k', KEY_L => 'l',
    KEY_SEMICOLON => ';', KEY_APOSTROPHE => '\'', KEY_GRAVE => '`', KEY_BACKSLASH => '\\',
    KEY_Z => 'z', KEY_X => 'x', KEY_C => 'c', KEY_V => 'v', KEY_B => 'b',
    KEY_N => 'n', KEY_M => 'm',
    KEY_COMMA => ',', KEY_DOT => '.', KEY_SLASH => '/',
]);

static SHIFT: Table = build(&shared_entries![
    KEY_1 => '!', KEY_2 => '@', KEY_3 => '#', KEY_4 => '$', KEY_5 => '%',
    KEY_6 => '^', KEY_7 => '&', KEY_8 => '*', KEY_9 => '(', KEY_0 => ')',
    KEY_MINUS => '_', KEY_EQUAL => '+',
    KEY_Q => 'Q', KEY_W => 'W', KEY_E => 'E', KEY_R => 'R', KEY_T => 'T',
    KEY_Y => 'Y', KEY_U => 'U', KEY_I => 'I', KEY_O => 'O', KEY_P => 'P',
    KEY_LEFTBRACE => '{', KEY_RIGHTBRACE => '}',
    KEY_A => 'A', KEY_S => 'S', KEY_D => 'D', KEY_F => 'F', KEY_G => 'G',
    KEY_H => 'H', KEY_J => 'J', KEY_K => 'K', KEY_L => 'L',
    KEY_SEMICOLON => ':', KEY_APOSTROPHE => '"', KEY_GRAVE => '~', KEY_BACKSLASH => '|',
    KEY_Z => 'Z', KEY_X => 'X', KEY_C => 'C', KEY_V => 'V', KEY_B => 'B',
    KEY_N => 'N', KEY_M => 'M',
    KEY_COMMA => '<', KEY_DOT => '>', KEY_SLASH => '?',
]);

/// Look up `code` in the shift table if `shifted`, else in the base table.
pub fn lookup(code: u16, shifted: bool) -> Option<char> {
    let table = if shifted { &SHIFT } else { &BASE };

    table.get(usize::from(code)).copied().flatten()
}

/// Resolve `code` to the character it types under the given modifier state.
pub fn resolve(code: u16, modifiers: &ModifierState) -> Option<char> {
    let chr = lookup(code, modifiers.shift_held)?;

    if !modifiers.caps_lock {
        return Some(chr);
    }

    Some(match chr {
        c if c.is_ascii_lowercase() => c.to_ascii_uppercase(),
        c if c.is_ascii_uppercase() => c.to_ascii_lowercase(),
        c => c,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn state(caps_lock: bool, shift_held: bool) -> ModifierState {
        ModifierState {
            caps_lock,
            shift_held,
        }
    }

    #[test]
    fn base_and_shift_lookup() {
        assert_eq!(lookup(KEY_A, false), Some('a'));
        assert_eq!(lookup(KEY_A, true), Some('A'));
        assert_eq!(lookup(KEY_1, true), Some('!'));
        assert_eq!(lookup(KEY_LEFTBRACE, false), Some('['));
        assert_eq!(lookup(KEY_LEFTBRACE, true), Some('{'));
        assert_eq!(lookup(KEY_KP1, true), Some('1'));
    }

    #[test]
    fn unmapped_codes() {
        for code in [KEY_ESC, KEY_LEFTSHIFT, KEY_CAPSLOCK, KEY_F10, 255, 300, u16::MAX] {
            assert_eq!(lookup(code, false), None, "code {code}");
            assert_eq!(lookup(code, true), None, "code {code}");
        }
    }

    #[test]
    fn caps_lock_flips_letters_only() {
        assert_eq!(resolve(KEY_A, &state(true, false)), Some('A'));
        assert_eq!(resolve(KEY_A, &state(true, true)), Some('a'));
        assert_eq!(resolve(KEY_1, &state(true, false)), Some('1'));
        assert_eq!(resolve(KEY_1, &state(true, true)), Some('!'));
        assert_eq!(resolve(KEY_SLASH, &state(true, true)), Some('?'));
    }

    #[test]
    fn shifted_letters_are_distinct() {
        let letters = (0..=u16::MAX)
            .filter_map(|code| lookup(code, true))
            .filter(char::is_ascii_alphabetic)
            .collect::<Vec<_>>();
        let unique = letters.iter().collect::<HashSet<_>>();

        assert_eq!(letters.len(), 26);
        assert_eq!(unique.len(), 26);
    }

    #[test]
    fn tables_cover_the_same_keys() {
        for code in 0..TABLE_LEN as u16 {
            assert_eq!(
                lookup(code, false).is_some(),
                lookup(code, true).is_some(),
                "code {code}"
            );
        }
    }
}
