use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use locust_common::globals::{self, PRIMARY_COLS, ROWS};

use crate::{
    key_scanner::KeyScanner,
    key_state::KeyStateEngine,
    link::{PollBus, RemoteLink},
    sink::OutputSink,
};

/// The half wired to the host: polls the secondary, scans its own matrix and turns both into
/// keystrokes.
pub struct Primary<'k, B, I, O, D, P>
where
    B: PollBus,
    I: InputPin,
    O: OutputPin,
    D: DelayNs,
    P: DelayNs,
{
    link: RemoteLink<B>,
    scanner: KeyScanner<I, O, D, ROWS, PRIMARY_COLS>,
    engine: KeyStateEngine<'k>,
    pacer: P,
    pause_micros: u32,
}

impl<'k, B, I, O, D, P> Primary<'k, B, I, O, D, P>
where
    B: PollBus,
    I: InputPin,
    O: OutputPin,
    D: DelayNs,
    P: DelayNs,
{
    pub fn new(
        link: RemoteLink<B>,
        scanner: KeyScanner<I, O, D, ROWS, PRIMARY_COLS>,
        engine: KeyStateEngine<'k>,
        pacer: P,
    ) -> Self {
        Self {
            link,
            scanner,
            engine,
            pacer,
            pause_micros: globals::PRIMARY_CYCLE_PAUSE_MICROS,
        }
    }

    pub fn engine(&self) -> &KeyStateEngine<'k> {
        &self.engine
    }

    pub fn link(&self) -> &RemoteLink<B> {
        &self.link
    }

    /// One pass: fetch the remote rows, scan the local matrix, then walk local and remote keys.
    pub async fn cycle(&mut self, sink: &mut impl OutputSink) {
        let remote = self.link.refresh();
        let local = *self.scanner.scan().await;

        self.engine.process_local(&local, sink);
        self.engine.process_remote(&remote, sink);
    }

    pub async fn run(mut self, mut sink: impl OutputSink) -> ! {
        loop {
            self.cycle(&mut sink).await;
            self.pacer.delay_us(self.pause_micros).await;
        }
    }
}

#[cfg(test)]
#[path = "primary_test.rs"]
mod test;
