use locust_common::globals::{PRIMARY_COLS, ROWS, SECONDARY_COLS};
use locust_common::keycodes::usage;

/// What a matrix position sends to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    /// Printable ASCII.
    Char(u8),
    /// Keyboard page usage code.
    Key(u8),
    /// Unused position.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEntry {
    pub symbol: Symbol,
    pub is_modifier: bool,
}

impl KeyEntry {
    pub const fn ch(ch: u8) -> Self {
        Self {
            symbol: Symbol::Char(ch),
            is_modifier: false,
        }
    }

    pub const fn key(code: u8) -> Self {
        Self {
            symbol: Symbol::Key(code),
            is_modifier: false,
        }
    }

    pub const fn modifier(code: u8) -> Self {
        Self {
            symbol: Symbol::Key(code),
            is_modifier: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            symbol: Symbol::None,
            is_modifier: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Half {
    Primary,
    Secondary,
}

/// Row by logical column table for one half.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap<const ROWS: usize, const COLS: usize> {
    entries: [[KeyEntry; COLS]; ROWS],
}

impl<const ROWS: usize, const COLS: usize> Keymap<ROWS, COLS> {
    pub const fn new(entries: [[KeyEntry; COLS]; ROWS]) -> Self {
        Self { entries }
    }

    /// Entry at a logical coordinate; out of range positions are [KeyEntry::none].
    pub fn get(&self, row: usize, col: usize) -> KeyEntry {
        self.entries
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(KeyEntry::none())
    }

    pub fn is_modifier(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_modifier
    }
}

pub type PrimaryKeymap = Keymap<ROWS, PRIMARY_COLS>;
pub type SecondaryKeymap = Keymap<ROWS, SECONDARY_COLS>;

const fn c(ch: u8) -> KeyEntry {
    KeyEntry::ch(ch)
}

const fn k(code: u8) -> KeyEntry {
    KeyEntry::key(code)
}

const fn m(code: u8) -> KeyEntry {
    KeyEntry::modifier(code)
}

const NO: KeyEntry = KeyEntry::none();

#[rustfmt::skip]
pub const PRIMARY_KEYMAP: PrimaryKeymap = Keymap::new([
    [k(usage::ESCAPE),    c(b'1'), c(b'2'),            c(b'3'),            c(b'4'), c(b'5')],
    [k(usage::TAB),       c(b'q'), c(b'w'),            c(b'e'),            c(b'r'), c(b't')],
    [k(usage::CAPS_LOCK), c(b'a'), c(b's'),            c(b'd'),            c(b'f'), c(b'g')],
    [m(usage::LEFT_SHIFT), c(b'z'), c(b'x'),           c(b'c'),            c(b'v'), c(b'b')],
    [m(usage::LEFT_CTRL), c(b'`'), m(usage::LEFT_GUI), m(usage::LEFT_ALT), c(b' '), NO],
]);

#[rustfmt::skip]
pub const SECONDARY_KEYMAP: SecondaryKeymap = Keymap::new([
    [c(b'6'), c(b'7'), c(b'8'),             c(b'9'),        c(b'0'),             c(b'-'),               c(b'='),          k(usage::BACKSPACE)],
    [c(b'y'), c(b'u'), c(b'i'),             c(b'o'),        c(b'p'),             c(b'['),               c(b']'),          c(b'\\')],
    [c(b'h'), c(b'j'), c(b'k'),             c(b'l'),        c(b';'),             c(b'\''),              k(usage::ENTER),  NO],
    [c(b'n'), c(b'm'), c(b','),             c(b'.'),        c(b'/'),             m(usage::RIGHT_SHIFT), k(usage::UP),     k(usage::DELETE)],
    [NO,      c(b' '), m(usage::RIGHT_ALT), k(usage::MENU), m(usage::RIGHT_CTRL), k(usage::LEFT),       k(usage::DOWN),   k(usage::RIGHT)],
]);

/// Look up a logical coordinate on either half.
pub fn lookup(half: Half, row: usize, col: usize) -> KeyEntry {
    match half {
        Half::Primary => PRIMARY_KEYMAP.get(row, col),
        Half::Secondary => SECONDARY_KEYMAP.get(row, col),
    }
}

#[cfg(test)]
#[path = "keymap_test.rs"]
mod test;
