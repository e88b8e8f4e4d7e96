use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;
use locust_common::{globals, wire};

/// One bit per column per row; set while the switch is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RowMasks<const ROWS: usize>([u8; ROWS]);

impl<const ROWS: usize> Default for RowMasks<ROWS> {
    fn default() -> Self {
        Self([0; ROWS])
    }
}

impl<const ROWS: usize> RowMasks<ROWS> {
    pub const fn from_rows(rows: [u8; ROWS]) -> Self {
        Self(rows)
    }

    pub fn rows(&self) -> &[u8; ROWS] {
        &self.0
    }

    pub fn row(&self, row: usize) -> u8 {
        self.0[row]
    }

    pub fn is_set(&self, row: usize, col: usize) -> bool {
        wire::is_column_set(self.0[row], col)
    }

    pub fn set(&mut self, row: usize, col: usize, closed: bool) {
        wire::set_column(&mut self.0[row], col, closed);
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|r| *r != 0)
    }
}

/// Line settling waits around each row assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTiming {
    /// Wait after pulling a row low, before sampling.
    pub settle_micros: u32,
    /// Wait after releasing a row, before the next one.
    pub release_micros: u32,
}

impl ScanTiming {
    pub const PRIMARY: Self = Self {
        settle_micros: globals::PRIMARY_SETTLE_MICROS,
        release_micros: globals::PRIMARY_RELEASE_SETTLE_MICROS,
    };

    pub const SECONDARY: Self = Self {
        settle_micros: globals::SECONDARY_SETTLE_MICROS,
        release_micros: globals::SECONDARY_RELEASE_SETTLE_MICROS,
    };
}

/// Row-driven matrix scanner.
///
/// Rows are outputs, idle high; columns are pulled-up inputs. A column reading low while its row
/// is driven low is a closed switch. There is no debounce: every scan rewrites every bit from the
/// pins.
pub struct KeyScanner<I, O, D, const ROWS: usize, const COLS: usize>
where
    I: InputPin,
    O: OutputPin,
    D: DelayNs,
{
    row_pins: [O; ROWS],
    col_pins: [I; COLS],
    delay: D,
    timing: ScanTiming,
    masks: RowMasks<ROWS>,
}

impl<I, O, D, const ROWS: usize, const COLS: usize> KeyScanner<I, O, D, ROWS, COLS>
where
    I: InputPin,
    O: OutputPin,
    D: DelayNs,
{
    const COLS_FIT_IN_MASK: () = assert!(COLS <= 8, "a row mask holds at most 8 columns");

    pub fn new(row_pins: [O; ROWS], col_pins: [I; COLS], delay: D, timing: ScanTiming) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::COLS_FIT_IN_MASK;

        let mut scanner = Self {
            row_pins,
            col_pins,
            delay,
            timing,
            masks: RowMasks::default(),
        };
        for op in scanner.row_pins.iter_mut() {
            let _ = op.set_high();
        }
        scanner
    }

    /// Result of the last completed scan.
    pub fn masks(&self) -> &RowMasks<ROWS> {
        &self.masks
    }

    pub async fn scan(&mut self) -> &RowMasks<ROWS> {
        for (row, op) in self.row_pins.iter_mut().enumerate() {
            let _ = op.set_low();
            self.delay.delay_us(self.timing.settle_micros).await;

            for (col, ip) in self.col_pins.iter_mut().enumerate() {
                let closed = ip.is_low().unwrap_or(false);
                self.masks.set(row, col, closed);
            }

            let _ = op.set_high();
            self.delay.delay_us(self.timing.release_micros).await;
        }

        &self.masks
    }
}

#[cfg(test)]
#[path = "key_scanner_test.rs"]
mod test;
