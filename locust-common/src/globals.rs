//! Compile-time tunables for both halves.
//!
//! Typematic delays are counted in scan cycles, not milliseconds. Changing
//! [`PRIMARY_CYCLE_PAUSE_MICROS`] or the settle times changes how long a key must be held before
//! it repeats.

pub const ROWS: usize = 5;
pub const PRIMARY_COLS: usize = 6;
pub const SECONDARY_COLS: usize = 8;

/// Bus address the secondary answers polls on.
pub const SECONDARY_ADDRESS: u8 = 8;

/// Cycles a key must stay down after its first keystroke before repeat is armed.
pub const INITIAL_DELAY_DEFAULT: u16 = 60;
/// Cycles between repeated keystrokes once repeat is armed.
pub const REPEAT_DELAY_DEFAULT: u16 = 6;

pub const PRIMARY_SETTLE_MICROS: u32 = 100;
pub const PRIMARY_RELEASE_SETTLE_MICROS: u32 = 100;
pub const SECONDARY_SETTLE_MICROS: u32 = 10;
pub const SECONDARY_RELEASE_SETTLE_MICROS: u32 = 100;

pub const PRIMARY_CYCLE_PAUSE_MICROS: u32 = 1000;
pub const SECONDARY_CYCLE_PAUSE_MICROS: u32 = 1000;

pub const PRIMARY_PIXELS: usize = 6;
pub const SECONDARY_PIXELS: usize = 8;

/// Orange, shown on every pixel at power on.
pub const DEFAULT_COLOR: (u8, u8, u8) = (200, 120, 0);
