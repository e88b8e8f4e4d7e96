use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use locust_common::globals::{self, ROWS, SECONDARY_COLS};

use crate::{key_scanner::KeyScanner, link::ScanShare};

/// The half with no host connection. It only scans and publishes; the bus responder answers
/// polls from the published rows.
pub struct Secondary<'s, I, O, D, P>
where
    I: InputPin,
    O: OutputPin,
    D: DelayNs,
    P: DelayNs,
{
    scanner: KeyScanner<I, O, D, ROWS, SECONDARY_COLS>,
    share: &'s ScanShare<ROWS>,
    pacer: P,
    pause_micros: u32,
}

impl<'s, I, O, D, P> Secondary<'s, I, O, D, P>
where
    I: InputPin,
    O: OutputPin,
    D: DelayNs,
    P: DelayNs,
{
    pub fn new(
        scanner: KeyScanner<I, O, D, ROWS, SECONDARY_COLS>,
        share: &'s ScanShare<ROWS>,
        pacer: P,
    ) -> Self {
        Self {
            scanner,
            share,
            pacer,
            pause_micros: globals::SECONDARY_CYCLE_PAUSE_MICROS,
        }
    }

    pub async fn cycle(&mut self) {
        let masks = self.scanner.scan().await;
        self.share.publish(masks);
    }

    pub async fn run(mut self) -> ! {
        loop {
            self.cycle().await;
            self.pacer.delay_us(self.pause_micros).await;
        }
    }
}

#[cfg(test)]
#[path = "secondary_test.rs"]
mod test;
