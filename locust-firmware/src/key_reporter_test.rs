extern crate std;

use embassy_futures::block_on;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use std::vec;

use crate::sink::OutputSink;
use crate::usb_test_stub::{MessageLog, MyEndpointIn};

use super::*;

macro_rules! setup {
    ($messages:ident, $rep:ident, $x:tt) => {
        block_on(async {
            let ep_in = MyEndpointIn::default();
            let $messages = ep_in.messages.clone();
            let hid_writer = HidWriter::<_, KEYBOARD_REPORT_LEN>::new(ep_in);
            let mut $rep = Reporter::new(hid_writer);

            $x
        });
    };
}

fn reports(messages: &MessageLog) -> std::vec::Vec<std::vec::Vec<u8>> {
    messages.take()
}

#[test]
fn write_char_taps_key() {
    setup!(messages, reporter, {
        reporter.report(KeyEvent::Write(Symbol::Char(b'a'))).await;

        assert_eq!(
            reports(&messages),
            [vec![0, 0, 4, 0, 0, 0, 0, 0], vec![0; 8]]
        );
    });
}

#[test]
fn shifted_char_adds_left_shift() {
    setup!(messages, reporter, {
        reporter.report(KeyEvent::Write(Symbol::Char(b'A'))).await;
        reporter.report(KeyEvent::Write(Symbol::Char(b'?'))).await;

        assert_eq!(
            reports(&messages),
            [
                vec![2, 0, 4, 0, 0, 0, 0, 0],
                vec![0; 8],
                vec![2, 0, 0x38, 0, 0, 0, 0, 0],
                vec![0; 8],
            ]
        );
    });
}

#[test]
fn modifiers_hold_across_writes() {
    setup!(messages, reporter, {
        reporter
            .report(KeyEvent::Press(Symbol::Key(usage::LEFT_CTRL)))
            .await;
        reporter.report(KeyEvent::Write(Symbol::Char(b'c'))).await;
        reporter
            .report(KeyEvent::Release(Symbol::Key(usage::LEFT_CTRL)))
            .await;
        reporter
            .report(KeyEvent::Release(Symbol::Key(usage::LEFT_CTRL)))
            .await;

        assert_eq!(
            reports(&messages),
            [
                vec![1, 0, 0, 0, 0, 0, 0, 0],
                vec![1, 0, 6, 0, 0, 0, 0, 0],
                vec![1, 0, 0, 0, 0, 0, 0, 0],
                vec![0; 8],
            ]
        );
    });
}

#[test]
fn right_hand_modifier_bits() {
    setup!(messages, reporter, {
        reporter
            .report(KeyEvent::Press(Symbol::Key(usage::RIGHT_SHIFT)))
            .await;
        reporter
            .report(KeyEvent::Press(Symbol::Key(usage::RIGHT_ALT)))
            .await;
        assert_eq!(reporter.keyboard_report()[0], 0x20 | 0x40);
        assert_eq!(messages.len(), 2);
    });
}

#[test]
fn usage_keys_and_none() {
    setup!(messages, reporter, {
        reporter.report(KeyEvent::Write(Symbol::None)).await;
        reporter.report(KeyEvent::Press(Symbol::None)).await;
        assert!(messages.is_empty());

        reporter.report(KeyEvent::Write(Symbol::Key(usage::ENTER))).await;
        assert_eq!(
            reports(&messages),
            [vec![0, 0, 0x28, 0, 0, 0, 0, 0], vec![0; 8]]
        );
    });
}

#[test]
fn seventh_key_is_dropped() {
    setup!(messages, reporter, {
        for code in 4..10 {
            reporter.report(KeyEvent::Press(Symbol::Key(code))).await;
        }
        assert_eq!(reporter.keyboard_report(), [0, 0, 4, 5, 6, 7, 8, 9]);
        messages.take();

        reporter.report(KeyEvent::Press(Symbol::Key(10))).await;
        reporter.report(KeyEvent::Write(Symbol::Key(11))).await;
        assert!(messages.is_empty());

        reporter.report(KeyEvent::Release(Symbol::Key(4))).await;
        assert_eq!(
            reports(&messages),
            [vec![0, 0, 5, 6, 7, 8, 9, 0]]
        );
    });
}

#[test]
fn write_of_held_key_releases_first() {
    setup!(messages, reporter, {
        reporter.report(KeyEvent::Press(Symbol::Char(b'x'))).await;
        reporter.report(KeyEvent::Write(Symbol::Char(b'x'))).await;

        assert_eq!(
            reports(&messages),
            [
                vec![0, 0, 0x1b, 0, 0, 0, 0, 0],
                vec![0; 8],
                vec![0, 0, 0x1b, 0, 0, 0, 0, 0],
                vec![0; 8],
            ]
        );
    });
}

#[test]
fn endpoint_errors_are_dropped() {
    setup!(messages, reporter, {
        let ep_in = MyEndpointIn::default();
        ep_in.disabled.set(true);
        let failing = ep_in.messages.clone();
        let mut broken = Reporter::new(HidWriter::<_, KEYBOARD_REPORT_LEN>::new(ep_in));
        broken.report(KeyEvent::Write(Symbol::Char(b'a'))).await;
        assert!(failing.is_empty());
        assert_eq!(broken.keyboard_report(), [0; 8]);

        reporter.report(KeyEvent::Write(Symbol::Char(b'a'))).await;
        assert_eq!(messages.len(), 2);
    });
}

#[test]
fn channel_events_reach_reporter() {
    setup!(messages, reporter, {
        let channel: KeyEventChannel<NoopRawMutex, 4> = KeyEventChannel::new();
        let mut sink = &channel;
        sink.press(Symbol::Key(usage::LEFT_SHIFT));
        sink.write(Symbol::Char(b'1'));
        sink.release(Symbol::Key(usage::LEFT_SHIFT));

        while let Some(event) = channel.try_receive() {
            reporter.report(event).await;
        }

        assert_eq!(
            reports(&messages),
            [
                vec![2, 0, 0, 0, 0, 0, 0, 0],
                vec![2, 0, 0x1e, 0, 0, 0, 0, 0],
                vec![2, 0, 0, 0, 0, 0, 0, 0],
                vec![0; 8],
            ]
        );
    });
}
