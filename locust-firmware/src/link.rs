use core::sync::atomic::{AtomicU8, Ordering};

use locust_common::{
    globals::{ROWS, SECONDARY_ADDRESS},
    wire::{self, Payload, PAYLOAD_LEN},
};

use crate::{info, key_scanner::RowMasks, warn};

/// Primary side of the half-to-half bus.
pub trait PollBus {
    /// Request `buf.len()` bytes from `address`; returns how many arrived.
    ///
    /// Never fails: an absent or faulty peer reports fewer bytes, down to zero.
    fn poll(&mut self, address: u8, buf: &mut [u8]) -> usize;
}

impl<T: embedded_hal::i2c::I2c> PollBus for T {
    fn poll(&mut self, address: u8, buf: &mut [u8]) -> usize {
        match self.read(address, buf) {
            Ok(()) => buf.len(),
            Err(_) => 0,
        }
    }
}

/// Fetches the secondary's rows once per cycle.
pub struct RemoteLink<B: PollBus> {
    bus: B,
    address: u8,
    buf: Payload,
    cursor: usize,
    last_received: usize,
    connected: bool,
}

impl<B: PollBus> RemoteLink<B> {
    pub fn new(bus: B) -> Self {
        Self::with_address(bus, SECONDARY_ADDRESS)
    }

    pub fn with_address(bus: B, address: u8) -> Self {
        Self {
            bus,
            address,
            buf: [0; PAYLOAD_LEN],
            cursor: 0,
            last_received: 0,
            connected: false,
        }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// True when the last poll returned a complete payload.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Bytes received by the last poll.
    pub fn last_received(&self) -> usize {
        self.last_received
    }

    /// Poll the secondary. Rows that did not arrive read as no keys pressed.
    pub fn refresh(&mut self) -> RowMasks<ROWS> {
        self.buf = [0; PAYLOAD_LEN];
        self.cursor = self.bus.poll(self.address, &mut self.buf).min(PAYLOAD_LEN);
        let rows = wire::decode_rows(&self.buf, self.cursor);

        let complete = self.cursor == PAYLOAD_LEN;
        if complete != self.connected {
            if complete {
                info!("secondary connected at {}", self.address);
            } else {
                warn!(
                    "secondary lost, {} of {} bytes received",
                    self.cursor, PAYLOAD_LEN
                );
            }
            self.connected = complete;
        }

        self.last_received = self.cursor;
        self.cursor = 0;
        RowMasks::from_rows(rows)
    }
}

/// Last completed scan of the secondary, shared between its scan loop and its bus responder.
///
/// Each row is stored atomically; a reader may see rows from two consecutive scans.
pub struct ScanShare<const ROWS: usize> {
    rows: [AtomicU8; ROWS],
}

impl<const ROWS: usize> Default for ScanShare<ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROWS: usize> ScanShare<ROWS> {
    pub const fn new() -> Self {
        Self {
            rows: [const { AtomicU8::new(0) }; ROWS],
        }
    }

    pub fn publish(&self, masks: &RowMasks<ROWS>) {
        for (slot, row) in self.rows.iter().zip(masks.rows()) {
            slot.store(*row, Ordering::Relaxed);
        }
    }

    pub fn payload(&self) -> [u8; ROWS] {
        let mut payload = [0; ROWS];
        for (byte, slot) in payload.iter_mut().zip(self.rows.iter()) {
            *byte = slot.load(Ordering::Relaxed);
        }
        payload
    }

    /// Answer a poll into `buf`: the payload, then zeros for any extra bytes asked for.
    #[cfg(test)]
    pub fn respond(&self, buf: &mut [u8]) -> usize {
        let payload = self.payload();
        let n = buf.len().min(ROWS);
        buf[..n].copy_from_slice(&payload[..n]);
        buf[n..].fill(0);
        buf.len()
    }
}

impl ScanShare<ROWS> {
    pub fn wire_payload(&self) -> Payload {
        wire::encode_rows(&self.payload())
    }
}

#[cfg(test)]
#[path = "link_test.rs"]
mod test;
