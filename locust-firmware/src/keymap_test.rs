use super::*;

#[test]
fn modifier_positions() {
    let mut primary = 0;
    for row in 0..ROWS {
        for col in 0..PRIMARY_COLS {
            if PRIMARY_KEYMAP.is_modifier(row, col) {
                primary += 1;
                assert!(matches!((row, col), (3, 0) | (4, 0) | (4, 2) | (4, 3)));
            }
        }
    }
    assert_eq!(primary, 4);

    let mut secondary = 0;
    for row in 0..ROWS {
        for col in 0..SECONDARY_COLS {
            if SECONDARY_KEYMAP.is_modifier(row, col) {
                secondary += 1;
                assert!(matches!((row, col), (3, 5) | (4, 2) | (4, 4)));
            }
        }
    }
    assert_eq!(secondary, 3);
}

#[test]
fn modifiers_carry_modifier_usages() {
    for row in 0..ROWS {
        for col in 0..SECONDARY_COLS {
            let entry = lookup(Half::Secondary, row, col);
            if let Symbol::Key(code) = entry.symbol {
                assert_eq!(
                    entry.is_modifier,
                    locust_common::keycodes::key_range::is_modifier(code),
                    "({row}, {col})"
                );
            }
        }
    }
    assert_eq!(
        lookup(Half::Secondary, 4, 3),
        KeyEntry::key(usage::MENU),
        "menu is an ordinary key"
    );
}

#[test]
fn lookups() {
    assert_eq!(lookup(Half::Primary, 0, 0).symbol, Symbol::Key(usage::ESCAPE));
    assert_eq!(lookup(Half::Primary, 1, 1).symbol, Symbol::Char(b'q'));
    assert_eq!(lookup(Half::Primary, 4, 5).symbol, Symbol::None);
    assert_eq!(lookup(Half::Secondary, 0, 7).symbol, Symbol::Key(usage::BACKSPACE));
    assert_eq!(lookup(Half::Secondary, 2, 7).symbol, Symbol::None);
    assert_eq!(lookup(Half::Secondary, 4, 0).symbol, Symbol::None);
    assert_eq!(lookup(Half::Secondary, 1, 7).symbol, Symbol::Char(b'\\'));
}

#[test]
fn out_of_range_is_none() {
    assert_eq!(PRIMARY_KEYMAP.get(5, 0), KeyEntry::none());
    assert_eq!(PRIMARY_KEYMAP.get(0, 6), KeyEntry::none());
    assert!(!SECONDARY_KEYMAP.is_modifier(9, 9));
}
