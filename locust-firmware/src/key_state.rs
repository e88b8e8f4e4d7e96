use locust_common::{
    globals::{self, PRIMARY_COLS, ROWS, SECONDARY_COLS},
    wire,
};

use crate::{
    key_scanner::RowMasks,
    keymap::{self, KeyEntry, Keymap, PrimaryKeymap, SecondaryKeymap, Symbol},
    sink::OutputSink,
};

/// Hold bookkeeping for one coordinate.
///
/// A released key always has `hold_count == 0` and `long_hold == false`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HoldRecord {
    pub hold_count: u16,
    pub long_hold: bool,
}

impl HoldRecord {
    pub fn is_released(&self) -> bool {
        self.hold_count == 0
    }
}

/// Typematic tunables, both counted in scan cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Typematic {
    pub initial_delay: u16,
    pub repeat_delay: u16,
}

impl Default for Typematic {
    fn default() -> Self {
        Self {
            initial_delay: globals::INITIAL_DELAY_DEFAULT,
            repeat_delay: globals::REPEAT_DELAY_DEFAULT,
        }
    }
}

/// How raw bit positions map onto keymap columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOrder {
    /// Bit `c` is column `c`.
    Direct,
    /// Bit `c` is column `COLS - 1 - c`.
    Reversed,
}

impl ColumnOrder {
    pub const fn column(self, bit: usize, cols: usize) -> usize {
        match self {
            ColumnOrder::Direct => bit,
            ColumnOrder::Reversed => wire::logical_column(bit, cols),
        }
    }
}

/// Apply one cycle's observation of a key to its hold record.
///
/// Modifiers press once when first seen and release once when first seen up; a press or release
/// the sink refuses is retried on the next cycle. Other keys write
/// once on the first pressed cycle, arm repeat after `initial_delay` further cycles and then
/// write every `repeat_delay` cycles.
pub fn transition(
    record: &mut HoldRecord,
    pressed: bool,
    entry: KeyEntry,
    typematic: &Typematic,
    sink: &mut impl OutputSink,
) {
    let symbol = entry.symbol;
    if symbol == Symbol::None {
        return;
    }

    // a modifier record only changes once the sink took the event
    if entry.is_modifier {
        if pressed {
            if record.is_released() && sink.press(symbol) {
                record.hold_count = 1;
            }
        } else if !record.is_released() && sink.release(symbol) {
            *record = HoldRecord::default();
        }
        return;
    }

    if !pressed {
        *record = HoldRecord::default();
        return;
    }

    if record.is_released() {
        sink.write(symbol);
        record.hold_count = 1;
        return;
    }

    record.hold_count = record.hold_count.saturating_add(1);
    if record.long_hold {
        if record.hold_count > typematic.repeat_delay {
            sink.write(symbol);
            record.hold_count = 1;
        }
    } else if record.hold_count > typematic.initial_delay {
        record.long_hold = true;
        record.hold_count = 1;
    }
}

/// Hold records for every coordinate of one half, indexed by logical column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyStates<const ROWS: usize, const COLS: usize> {
    records: [[HoldRecord; COLS]; ROWS],
    order: ColumnOrder,
}

impl<const ROWS: usize, const COLS: usize> KeyStates<ROWS, COLS> {
    pub fn new(order: ColumnOrder) -> Self {
        Self {
            records: [[HoldRecord::default(); COLS]; ROWS],
            order,
        }
    }

    pub fn get(&self, row: usize, col: usize) -> HoldRecord {
        self.records[row][col]
    }

    pub fn all_released(&self) -> bool {
        self.records.iter().flatten().all(HoldRecord::is_released)
    }

    /// Walk every coordinate, rows in order and bit positions from high to low.
    pub fn apply(
        &mut self,
        masks: &RowMasks<ROWS>,
        keymap: &Keymap<ROWS, COLS>,
        typematic: &Typematic,
        sink: &mut impl OutputSink,
    ) {
        for row in 0..ROWS {
            for bit in (0..COLS).rev() {
                let col = self.order.column(bit, COLS);
                transition(
                    &mut self.records[row][col],
                    masks.is_set(row, bit),
                    keymap.get(row, col),
                    typematic,
                    sink,
                );
            }
        }
    }
}

/// Hold state for the local matrix and the mirrored remote one.
pub struct KeyStateEngine<'k> {
    typematic: Typematic,
    local_map: &'k PrimaryKeymap,
    remote_map: &'k SecondaryKeymap,
    local: KeyStates<ROWS, PRIMARY_COLS>,
    remote: KeyStates<ROWS, SECONDARY_COLS>,
}

impl KeyStateEngine<'static> {
    pub fn new(typematic: Typematic) -> Self {
        Self::with_keymaps(typematic, &keymap::PRIMARY_KEYMAP, &keymap::SECONDARY_KEYMAP)
    }
}

impl<'k> KeyStateEngine<'k> {
    pub fn with_keymaps(
        typematic: Typematic,
        local_map: &'k PrimaryKeymap,
        remote_map: &'k SecondaryKeymap,
    ) -> Self {
        Self {
            typematic,
            local_map,
            remote_map,
            local: KeyStates::new(ColumnOrder::Direct),
            remote: KeyStates::new(ColumnOrder::Reversed),
        }
    }

    pub fn typematic(&self) -> &Typematic {
        &self.typematic
    }

    pub fn local(&self) -> &KeyStates<ROWS, PRIMARY_COLS> {
        &self.local
    }

    pub fn remote(&self) -> &KeyStates<ROWS, SECONDARY_COLS> {
        &self.remote
    }

    pub fn process_local(&mut self, masks: &RowMasks<ROWS>, sink: &mut impl OutputSink) {
        self.local.apply(masks, self.local_map, &self.typematic, sink);
    }

    /// `masks` are in the secondary's own bit order.
    pub fn process_remote(&mut self, masks: &RowMasks<ROWS>, sink: &mut impl OutputSink) {
        self.remote.apply(masks, self.remote_map, &self.typematic, sink);
    }
}

#[cfg(test)]
#[path = "key_state_test.rs"]
mod test;
