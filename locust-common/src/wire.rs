//! Packed-row payload exchanged between the halves.
//!
//! The secondary answers each poll with [`PAYLOAD_LEN`] bytes. Byte `i` holds row `i`; bit `c`
//! is set when column `c` of that row is closed, column 0 in the least significant bit, using
//! the secondary's own column order. The secondary's columns run opposite to the primary's
//! addressing so the primary reads bit `c` as logical column `cols - 1 - c`; see
//! [`logical_column`].

use crate::globals::ROWS;

pub const PAYLOAD_LEN: usize = ROWS;

pub type Payload = [u8; PAYLOAD_LEN];

pub fn encode_rows(rows: &[u8; ROWS]) -> Payload {
    *rows
}

/// Rebuild the row masks from the bytes actually received.
///
/// Rows beyond `received` read as all keys up; so do rows past the end of `buf`.
pub fn decode_rows(buf: &[u8], received: usize) -> [u8; ROWS] {
    let mut rows = [0; ROWS];
    let n = received.min(buf.len()).min(ROWS);
    rows[..n].copy_from_slice(&buf[..n]);
    rows
}

/// Set or clear bit `col` of a row mask.
#[inline]
pub fn set_column(mask: &mut u8, col: usize, closed: bool) {
    if closed {
        *mask |= 1 << col;
    } else {
        *mask &= !(1 << col);
    }
}

#[inline]
pub fn is_column_set(mask: u8, col: usize) -> bool {
    (mask >> col) & 1 == 1
}

/// Logical column of a secondary bit position.
///
/// ```
/// use locust_common::wire::logical_column;
///
/// assert_eq!(logical_column(0, 8), 7);
/// assert_eq!(logical_column(7, 8), 0);
/// ```
#[inline]
pub const fn logical_column(bit: usize, cols: usize) -> usize {
    cols - 1 - bit
}

#[cfg(test)]
#[path = "wire_test.rs"]
mod test;
