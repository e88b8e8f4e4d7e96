use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_usb::driver::EndpointIn;
use locust_common::keycodes::{ascii_to_usage, key_range, usage};

use crate::{
    hid::HidWriter,
    keymap::Symbol,
    sink::{KeyEvent, KeyEventChannel},
    usb::KEYBOARD_REPORT_LEN,
    warn,
};

const KEY_SLOTS: usize = KEYBOARD_REPORT_LEN - 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldKey {
    usage: u8,
    shift: bool,
}

enum Resolved {
    Modifier(u8),
    Key(HeldKey),
}

fn resolve(symbol: Symbol) -> Option<Resolved> {
    match symbol {
        Symbol::None => None,
        Symbol::Key(code) if key_range::is_modifier(code) => {
            Some(Resolved::Modifier(key_range::modifier_bit(code)))
        }
        Symbol::Key(code) => Some(Resolved::Key(HeldKey {
            usage: code,
            shift: false,
        })),
        Symbol::Char(ch) => match ascii_to_usage(ch) {
            Some((usage, shift)) => Some(Resolved::Key(HeldKey { usage, shift })),
            None => {
                warn!("no usage for character {}", ch);
                None
            }
        },
    }
}

/// Boot keyboard report builder: `[modifiers, 0, k0..k5]`.
pub struct Reporter<E: EndpointIn> {
    hid_writer: HidWriter<E, KEYBOARD_REPORT_LEN>,
    modifiers: u8,
    keys: heapless::Vec<HeldKey, KEY_SLOTS>,
}

impl<E: EndpointIn> Reporter<E> {
    pub fn new(hid_writer: HidWriter<E, KEYBOARD_REPORT_LEN>) -> Self {
        Self {
            hid_writer,
            modifiers: 0,
            keys: heapless::Vec::new(),
        }
    }

    /// The report that would be sent now.
    pub fn keyboard_report(&self) -> [u8; KEYBOARD_REPORT_LEN] {
        let mut report = [0; KEYBOARD_REPORT_LEN];
        report[0] = self.modifiers;
        if self.keys.iter().any(|k| k.shift) {
            report[0] |= key_range::modifier_bit(usage::LEFT_SHIFT);
        }
        for (slot, key) in report[2..].iter_mut().zip(self.keys.iter()) {
            *slot = key.usage;
        }
        report
    }

    async fn write_keyboard_report(&mut self) {
        let report = self.keyboard_report();
        if let Err(e) = self.hid_writer.write(&report).await {
            warn!("Failed to send report: {:?}", e);
        }
    }

    fn add_key(&mut self, key: HeldKey) -> bool {
        if self.keys.iter().any(|k| k.usage == key.usage) {
            return true;
        }
        if self.keys.push(key).is_err() {
            warn!("more than {} keys down, dropping {}", KEY_SLOTS, key.usage);
            return false;
        }
        true
    }

    fn remove_key(&mut self, usage: u8) -> bool {
        match self.keys.iter().position(|k| k.usage == usage) {
            Some(i) => {
                self.keys.remove(i);
                true
            }
            None => false,
        }
    }

    pub async fn report(&mut self, event: KeyEvent) {
        match event {
            KeyEvent::Press(symbol) => match resolve(symbol) {
                Some(Resolved::Modifier(bit)) => {
                    self.modifiers |= bit;
                    self.write_keyboard_report().await;
                }
                Some(Resolved::Key(key)) => {
                    if self.add_key(key) {
                        self.write_keyboard_report().await;
                    }
                }
                None => {}
            },
            KeyEvent::Release(symbol) => match resolve(symbol) {
                Some(Resolved::Modifier(bit)) => {
                    if self.modifiers & bit != 0 {
                        self.modifiers &= !bit;
                        self.write_keyboard_report().await;
                    }
                }
                Some(Resolved::Key(key)) => {
                    if self.remove_key(key.usage) {
                        self.write_keyboard_report().await;
                    }
                }
                None => {}
            },
            KeyEvent::Write(symbol) => match resolve(symbol) {
                Some(Resolved::Modifier(bit)) => {
                    if self.modifiers & bit == 0 {
                        self.modifiers |= bit;
                        self.write_keyboard_report().await;
                        self.modifiers &= !bit;
                        self.write_keyboard_report().await;
                    }
                }
                Some(Resolved::Key(key)) => {
                    if self.remove_key(key.usage) {
                        self.write_keyboard_report().await;
                    }
                    if self.add_key(key) {
                        self.write_keyboard_report().await;
                        self.remove_key(key.usage);
                        self.write_keyboard_report().await;
                    }
                }
                None => {}
            },
        }
    }

    /// Drain `channel` into reports forever.
    pub async fn run<M: RawMutex, const N: usize>(mut self, channel: &KeyEventChannel<M, N>) -> ! {
        self.hid_writer.ready().await;
        loop {
            let event = channel.receive().await;
            self.report(event).await;
        }
    }
}

#[cfg(test)]
#[path = "key_reporter_test.rs"]
mod test;
