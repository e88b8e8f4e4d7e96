use super::*;

#[test]
fn letters_and_digits() {
    assert_eq!(ascii_to_usage(b'q'), Some((0x14, false)));
    assert_eq!(ascii_to_usage(b'Z'), Some((0x1d, true)));
    assert_eq!(ascii_to_usage(b'1'), Some((0x1e, false)));
    assert_eq!(ascii_to_usage(b'9'), Some((0x26, false)));
    assert_eq!(ascii_to_usage(b'0'), Some((0x27, false)));
}

#[test]
fn punctuation_shares_keys_with_shifted_pairs() {
    for (plain, shifted) in [
        (b'-', b'_'),
        (b'=', b'+'),
        (b'[', b'{'),
        (b']', b'}'),
        (b'\\', b'|'),
        (b';', b':'),
        (b'\'', b'"'),
        (b'`', b'~'),
        (b',', b'<'),
        (b'.', b'>'),
        (b'/', b'?'),
    ] {
        let (p, ps) = ascii_to_usage(plain).unwrap();
        let (s, ss) = ascii_to_usage(shifted).unwrap();
        assert_eq!(p, s, "{} and {}", plain as char, shifted as char);
        assert!(!ps);
        assert!(ss);
    }
}

#[test]
fn control_characters() {
    assert_eq!(ascii_to_usage(b' '), Some((usage::SPACE, false)));
    assert_eq!(ascii_to_usage(b'\n'), Some((usage::ENTER, false)));
    assert_eq!(ascii_to_usage(b'\t'), Some((usage::TAB, false)));
    assert_eq!(ascii_to_usage(0x00), None);
    assert_eq!(ascii_to_usage(0xb1), None);
}

#[test]
fn modifier_range() {
    assert!(key_range::is_modifier(usage::LEFT_CTRL));
    assert!(key_range::is_modifier(usage::RIGHT_GUI));
    assert!(!key_range::is_modifier(usage::MENU));
    assert_eq!(key_range::modifier_bit(usage::LEFT_SHIFT), 0b0000_0010);
    assert_eq!(key_range::modifier_bit(usage::RIGHT_CTRL), 0b0001_0000);
}
