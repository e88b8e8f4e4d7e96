extern crate alloc;
extern crate std;

use alloc::vec;
use core::cell::{Cell, RefCell};
use embedded_hal::digital::{Error, ErrorType, InputPin, OutputPin};
use std::rc::Rc;
use std::vec::Vec;

pub trait Observer {
    fn update(&self);
}

#[derive(Debug)]
struct KeyMatrixInner {
    switches: Vec<bool>,
    cols: Vec<Pin>,
    rows: Vec<Pin>,
}

/// A simulated switch matrix. Row pins are driven by the scanner; a column pin reads low while
/// any driven-low row has a closed switch on that column.
#[derive(Clone)]
pub struct KeyMatrix {
    inner: Rc<RefCell<KeyMatrixInner>>,
}
impl KeyMatrix {
    pub fn new(rows: Vec<Pin>, cols: Vec<Pin>) -> Self {
        let me = Self {
            inner: Rc::new(RefCell::new(KeyMatrixInner {
                switches: vec![false; cols.len() * rows.len()],
                cols,
                rows,
            })),
        };

        for r in me.inner.borrow().rows.iter() {
            r.add_observer(Rc::new(me.clone()));
        }
        me.refresh();

        me
    }

    /// Build a matrix with fresh row pins numbered from 0 and column pins numbered after them.
    pub fn with_size(rows: usize, cols: usize) -> (Self, Vec<Pin>, Vec<Pin>) {
        let row_pins: Vec<Pin> = (0..rows).map(|i| Pin::new(i as u8)).collect();
        let col_pins: Vec<Pin> = (0..cols).map(|i| Pin::new((rows + i) as u8)).collect();
        let me = Self::new(row_pins.clone(), col_pins.clone());
        (me, row_pins, col_pins)
    }

    pub fn down(&self, row: usize, col: usize) {
        self.set_switch(row, col, true);
    }

    pub fn up(&self, row: usize, col: usize) {
        self.set_switch(row, col, false);
    }

    pub fn set_switch(&self, row: usize, col: usize, is_down: bool) {
        {
            let mut inner = self.inner.borrow_mut();
            let idx = col * inner.rows.len() + row;
            inner.switches[idx] = is_down;
        }
        self.refresh();
    }

    fn refresh(&self) {
        let inner = self.inner.borrow();
        let nrows = inner.rows.len();
        for (col, cp) in inner.cols.iter().enumerate() {
            let closed = inner
                .rows
                .iter()
                .enumerate()
                .any(|(row, rp)| rp.get_state() == Some(false) && inner.switches[col * nrows + row]);
            cp.set_level(!closed);
        }
    }
}
impl Observer for KeyMatrix {
    fn update(&self) {
        self.refresh();
    }
}

#[derive(Debug)]
pub struct TestError;

impl Error for TestError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

#[derive(Clone)]
pub struct Pin(Rc<PinShared>);
impl core::fmt::Debug for Pin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pin")
            .field("n", &self.0.n)
            .field("state", &self.get_state())
            .finish()
    }
}
impl Pin {
    pub fn new(n: u8) -> Self {
        Self(Rc::new(PinShared {
            n,
            observer: RefCell::new(None),
            is_high: Cell::new(None),
            failing: Cell::new(false),
            low_count: Cell::new(0),
        }))
    }

    pub fn num(&self) -> u8 {
        self.0.n
    }

    pub fn get_state(&self) -> Option<bool> {
        self.0.is_high.get()
    }

    /// Number of times this pin has been driven low.
    pub fn low_count(&self) -> usize {
        self.0.low_count.get()
    }

    /// Make every subsequent read and write return [TestError].
    pub fn set_failing(&self, failing: bool) {
        self.0.failing.set(failing);
    }

    fn set_level(&self, is_high: bool) {
        self.0.is_high.set(Some(is_high));
    }

    fn add_observer(&self, observer: Rc<dyn Observer>) {
        *self.0.observer.borrow_mut() = Some(observer);
    }

    fn drive(&self, is_high: bool) -> Result<(), TestError> {
        if self.0.failing.get() {
            return Err(TestError);
        }
        if self.get_state() != Some(is_high) {
            self.set_level(is_high);
            if !is_high {
                self.0.low_count.set(self.0.low_count.get() + 1);
            }
            let observer = self.0.observer.borrow().clone();
            if let Some(o) = observer {
                o.update();
            }
        }
        Ok(())
    }

    fn read(&self) -> Result<Option<bool>, TestError> {
        if self.0.failing.get() {
            Err(TestError)
        } else {
            Ok(self.get_state())
        }
    }
}

struct PinShared {
    n: u8,
    observer: RefCell<Option<Rc<dyn Observer>>>,
    is_high: Cell<Option<bool>>,
    failing: Cell<bool>,
    low_count: Cell<usize>,
}

impl core::fmt::Debug for PinShared {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PinShared").field("n", &self.n).finish()
    }
}

impl ErrorType for Pin {
    type Error = TestError;
}

impl InputPin for Pin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(matches!(self.read()?, Some(true)))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(matches!(self.read()?, Some(false)))
    }
}

impl OutputPin for Pin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true)
    }
}

/// Records requested delays instead of waiting.
#[derive(Clone, Default)]
pub struct TestDelay(Rc<DelayLog>);

#[derive(Default)]
struct DelayLog {
    total_ns: Cell<u64>,
    calls: Cell<usize>,
}

impl TestDelay {
    pub fn total_micros(&self) -> u64 {
        self.0.total_ns.get() / 1000
    }

    pub fn calls(&self) -> usize {
        self.0.calls.get()
    }
}

impl embedded_hal_async::delay::DelayNs for TestDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.0.total_ns.set(self.0.total_ns.get() + ns as u64);
        self.0.calls.set(self.0.calls.get() + 1);
    }

    async fn delay_us(&mut self, us: u32) {
        self.0.total_ns.set(self.0.total_ns.get() + us as u64 * 1000);
        self.0.calls.set(self.0.calls.get() + 1);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.0.total_ns.set(self.0.total_ns.get() + ms as u64 * 1_000_000);
        self.0.calls.set(self.0.calls.get() + 1);
    }
}
