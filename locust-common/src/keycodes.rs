pub mod key_range {
    pub const BASIC_MIN: u8 = 0x4;
    pub const BASIC_A: u8 = 0x4;
    pub const BASIC_1: u8 = 0x1e;
    pub const BASIC_0: u8 = 0x27;
    pub const BASIC_MAX: u8 = 0xa4;
    pub const MODIFIER_MIN: u8 = 0xe0;
    pub const MODIFIER_MAX: u8 = 0xe7;

    pub fn is_modifier(usage: u8) -> bool {
        (MODIFIER_MIN..=MODIFIER_MAX).contains(&usage)
    }

    /// The bit a modifier usage occupies in the report's modifier byte.
    pub fn modifier_bit(usage: u8) -> u8 {
        1 << (usage - MODIFIER_MIN)
    }
}

/// Keyboard/Keypad page (0x07) usages for the non-printable keys in the layouts.
pub mod usage {
    pub const ENTER: u8 = 0x28;
    pub const ESCAPE: u8 = 0x29;
    pub const BACKSPACE: u8 = 0x2a;
    pub const TAB: u8 = 0x2b;
    pub const SPACE: u8 = 0x2c;
    pub const CAPS_LOCK: u8 = 0x39;
    pub const DELETE: u8 = 0x4c;
    pub const RIGHT: u8 = 0x4f;
    pub const LEFT: u8 = 0x50;
    pub const DOWN: u8 = 0x51;
    pub const UP: u8 = 0x52;
    pub const MENU: u8 = 0x65;

    pub const LEFT_CTRL: u8 = 0xe0;
    pub const LEFT_SHIFT: u8 = 0xe1;
    pub const LEFT_ALT: u8 = 0xe2;
    pub const LEFT_GUI: u8 = 0xe3;
    pub const RIGHT_CTRL: u8 = 0xe4;
    pub const RIGHT_SHIFT: u8 = 0xe5;
    pub const RIGHT_ALT: u8 = 0xe6;
    pub const RIGHT_GUI: u8 = 0xe7;
}

/// Map a printable ASCII character to its US layout usage and whether shift is needed.
///
/// ```
/// use locust_common::keycodes::ascii_to_usage;
///
/// assert_eq!(ascii_to_usage(b'a'), Some((0x04, false)));
/// assert_eq!(ascii_to_usage(b'*'), Some((0x25, true)));
/// assert_eq!(ascii_to_usage(0x7f), None);
/// ```
pub fn ascii_to_usage(ch: u8) -> Option<(u8, bool)> {
    use key_range::{BASIC_0, BASIC_1, BASIC_A};
    let code = match ch {
        b'a'..=b'z' => (BASIC_A + (ch - b'a'), false),
        b'A'..=b'Z' => (BASIC_A + (ch - b'A'), true),
        b'1'..=b'9' => (BASIC_1 + (ch - b'1'), false),
        b'0' => (BASIC_0, false),
        b'!' => (0x1e, true),
        b'@' => (0x1f, true),
        b'#' => (0x20, true),
        b'$' => (0x21, true),
        b'%' => (0x22, true),
        b'^' => (0x23, true),
        b'&' => (0x24, true),
        b'*' => (0x25, true),
        b'(' => (0x26, true),
        b')' => (0x27, true),
        b'\n' => (usage::ENTER, false),
        0x1b => (usage::ESCAPE, false),
        0x08 => (usage::BACKSPACE, false),
        b'\t' => (usage::TAB, false),
        b' ' => (usage::SPACE, false),
        b'-' => (0x2d, false),
        b'_' => (0x2d, true),
        b'=' => (0x2e, false),
        b'+' => (0x2e, true),
        b'[' => (0x2f, false),
        b'{' => (0x2f, true),
        b']' => (0x30, false),
        b'}' => (0x30, true),
        b'\\' => (0x31, false),
        b'|' => (0x31, true),
        b';' => (0x33, false),
        b':' => (0x33, true),
        b'\'' => (0x34, false),
        b'"' => (0x34, true),
        b'`' => (0x35, false),
        b'~' => (0x35, true),
        b',' => (0x36, false),
        b'<' => (0x36, true),
        b'.' => (0x37, false),
        b'>' => (0x37, true),
        b'/' => (0x38, false),
        b'?' => (0x38, true),
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
#[path = "keycodes_test.rs"]
mod test;
