use embassy_sync::{
    blocking_mutex::raw::RawMutex,
    channel::{Channel, Receiver},
};

use crate::keymap::Symbol;
use crate::warn;

/// Where the key-state engine sends keystrokes.
///
/// `release` of a symbol that is not held must be harmless. `press` and `release` return false
/// when the event was not taken; the caller issues it again on a later cycle.
pub trait OutputSink {
    /// Hold the symbol down until released.
    fn press(&mut self, symbol: Symbol) -> bool;
    fn release(&mut self, symbol: Symbol) -> bool;
    /// One complete keystroke: press then release.
    fn write(&mut self, symbol: Symbol);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyEvent {
    Press(Symbol),
    Release(Symbol),
    Write(Symbol),
}

/// Queue between the scan loop and the HID reporter.
pub struct KeyEventChannel<M: RawMutex, const N: usize>(Channel<M, KeyEvent, N>);

impl<M: RawMutex, const N: usize> Default for KeyEventChannel<M, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex, const N: usize> KeyEventChannel<M, N> {
    pub const fn new() -> Self {
        Self(Channel::new())
    }

    pub fn receiver(&self) -> Receiver<'_, M, KeyEvent, N> {
        self.0.receiver()
    }

    pub async fn receive(&self) -> KeyEvent {
        self.0.receive().await
    }

    pub fn try_receive(&self) -> Option<KeyEvent> {
        self.0.try_receive().ok()
    }

    fn push(&self, event: KeyEvent) -> bool {
        let sent = self.0.try_send(event).is_ok();
        if !sent {
            warn!("key event dropped, channel full");
        }
        sent
    }
}

impl<M: RawMutex, const N: usize> OutputSink for &KeyEventChannel<M, N> {
    fn press(&mut self, symbol: Symbol) -> bool {
        self.push(KeyEvent::Press(symbol))
    }

    fn release(&mut self, symbol: Symbol) -> bool {
        self.push(KeyEvent::Release(symbol))
    }

    fn write(&mut self, symbol: Symbol) {
        let _ = self.push(KeyEvent::Write(symbol));
    }
}

#[cfg(test)]
#[path = "sink_test.rs"]
mod test;
