extern crate std;

use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use locust_common::{globals::SECONDARY_COLS, keycodes::usage};
use std::vec::Vec;

use super::*;
use crate::{
    key_scanner::{RowMasks, ScanTiming},
    key_state::Typematic,
    keymap::Symbol,
    link::ScanShare,
    sink::{KeyEvent, KeyEventChannel},
    switch_test_stub::{KeyMatrix, Pin, TestDelay},
};

struct Wire<'a> {
    share: &'a ScanShare<ROWS>,
    up: bool,
}

impl PollBus for Wire<'_> {
    fn poll(&mut self, _address: u8, buf: &mut [u8]) -> usize {
        if self.up {
            self.share.respond(buf)
        } else {
            0
        }
    }
}

type TestPrimary<'a> = Primary<'static, Wire<'a>, Pin, Pin, TestDelay, TestDelay>;

fn arr<const N: usize>(pins: Vec<Pin>) -> [Pin; N] {
    pins.try_into().unwrap()
}

fn primary(share: &ScanShare<ROWS>) -> (KeyMatrix, TestPrimary<'_>) {
    let (matrix, rows, cols) = KeyMatrix::with_size(ROWS, PRIMARY_COLS);
    let scanner = KeyScanner::new(arr(rows), arr(cols), TestDelay::default(), ScanTiming::PRIMARY);
    let link = RemoteLink::new(Wire { share, up: true });
    let primary = Primary::new(
        link,
        scanner,
        KeyStateEngine::new(Typematic::default()),
        TestDelay::default(),
    );
    (matrix, primary)
}

fn drain(channel: &KeyEventChannel<NoopRawMutex, 16>) -> Vec<KeyEvent> {
    core::iter::from_fn(|| channel.try_receive()).collect()
}

#[test]
fn local_then_remote_each_cycle() {
    let share = ScanShare::new();
    let (matrix, mut primary) = primary(&share);
    let channel = KeyEventChannel::<NoopRawMutex, 16>::new();
    let mut sink = &channel;

    matrix.down(2, 1);
    // raw bit 0 is the outermost column: backspace in row 0
    share.publish(&RowMasks::from_rows([0b0000_0001, 0, 0, 0, 0]));

    block_on(primary.cycle(&mut sink));
    assert_eq!(
        drain(&channel),
        [
            KeyEvent::Write(Symbol::Char(b'a')),
            KeyEvent::Write(Symbol::Key(usage::BACKSPACE)),
        ]
    );
    assert!(primary.link().is_connected());

    block_on(primary.cycle(&mut sink));
    assert!(drain(&channel).is_empty());
    assert_eq!(primary.engine().local().get(2, 1).hold_count, 2);
    assert_eq!(primary.engine().remote().get(0, SECONDARY_COLS - 1).hold_count, 2);

    matrix.up(2, 1);
    share.publish(&RowMasks::default());
    block_on(primary.cycle(&mut sink));
    assert!(drain(&channel).is_empty());
    assert!(primary.engine().local().all_released());
    assert!(primary.engine().remote().all_released());
}

#[test]
fn modifiers_on_both_halves() {
    let share = ScanShare::new();
    let (matrix, mut primary) = primary(&share);
    let channel = KeyEventChannel::<NoopRawMutex, 16>::new();
    let mut sink = &channel;

    matrix.down(3, 0);
    // raw bit 3 of row 4 is logical column 4, right ctrl
    share.publish(&RowMasks::from_rows([0, 0, 0, 0, 0b0000_1000]));
    for _ in 0..100 {
        block_on(primary.cycle(&mut sink));
    }
    assert_eq!(
        drain(&channel),
        [
            KeyEvent::Press(Symbol::Key(usage::LEFT_SHIFT)),
            KeyEvent::Press(Symbol::Key(usage::RIGHT_CTRL)),
        ]
    );

    matrix.up(3, 0);
    share.publish(&RowMasks::default());
    block_on(primary.cycle(&mut sink));
    block_on(primary.cycle(&mut sink));
    assert_eq!(
        drain(&channel),
        [
            KeyEvent::Release(Symbol::Key(usage::LEFT_SHIFT)),
            KeyEvent::Release(Symbol::Key(usage::RIGHT_CTRL)),
        ]
    );
}

#[test]
fn lost_link_releases_remote_keys_only() {
    let share = ScanShare::new();
    let (matrix, mut primary) = primary(&share);
    let channel = KeyEventChannel::<NoopRawMutex, 16>::new();
    let mut sink = &channel;

    matrix.down(0, 0);
    // row 3 raw bit 2 is right shift
    share.publish(&RowMasks::from_rows([0, 0b1000_0000, 0, 0b0000_0100, 0]));
    block_on(primary.cycle(&mut sink));
    assert_eq!(
        drain(&channel),
        [
            KeyEvent::Write(Symbol::Key(usage::ESCAPE)),
            KeyEvent::Write(Symbol::Char(b'y')),
            KeyEvent::Press(Symbol::Key(usage::RIGHT_SHIFT)),
        ]
    );

    primary.link.bus_mut().up = false;
    block_on(primary.cycle(&mut sink));
    assert_eq!(
        drain(&channel),
        [KeyEvent::Release(Symbol::Key(usage::RIGHT_SHIFT))]
    );
    assert!(!primary.link().is_connected());
    assert!(primary.engine().remote().all_released());
    assert_eq!(primary.engine().local().get(0, 0).hold_count, 2);

    block_on(primary.cycle(&mut sink));
    assert!(drain(&channel).is_empty());
}
