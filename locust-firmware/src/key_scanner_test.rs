extern crate std;

use embassy_futures::block_on;
use std::vec::Vec;

use super::*;
use crate::switch_test_stub::{KeyMatrix, Pin, TestDelay};

fn arr<const N: usize>(pins: &[Pin]) -> [Pin; N] {
    pins.iter().cloned().collect::<Vec<_>>().try_into().unwrap()
}

fn setup<const ROWS: usize, const COLS: usize>(
    timing: ScanTiming,
) -> (KeyMatrix, KeyScanner<Pin, Pin, TestDelay, ROWS, COLS>, Vec<Pin>, TestDelay) {
    let (matrix, rows, cols) = KeyMatrix::with_size(ROWS, COLS);
    let delay = TestDelay::default();
    let scanner = KeyScanner::new(arr(&rows), arr(&cols), delay.clone(), timing);
    (matrix, scanner, rows, delay)
}

#[test]
fn new_drives_rows_high() {
    let (_matrix, _scanner, rows, _delay) = setup::<5, 6>(ScanTiming::PRIMARY);
    for r in rows {
        assert_eq!(r.get_state(), Some(true));
    }
}

#[test]
fn closed_switch_sets_bit_and_release_clears_it() {
    let (matrix, mut scanner, _rows, _delay) = setup::<5, 6>(ScanTiming::PRIMARY);

    let masks = *block_on(scanner.scan());
    assert!(!masks.any());

    matrix.down(2, 4);
    let masks = *block_on(scanner.scan());
    assert!(masks.is_set(2, 4));
    assert_eq!(masks.rows(), &[0, 0, 0b1_0000, 0, 0]);

    matrix.up(2, 4);
    let masks = *block_on(scanner.scan());
    assert!(!masks.is_set(2, 4));
    assert!(!masks.any());
    assert_eq!(scanner.masks(), &RowMasks::default());
}

#[test]
fn rows_are_sampled_one_at_a_time() {
    let (matrix, mut scanner, rows, _delay) = setup::<5, 8>(ScanTiming::SECONDARY);

    matrix.down(0, 7);
    matrix.down(3, 7);
    matrix.down(4, 0);

    let masks = *block_on(scanner.scan());
    assert_eq!(masks.rows(), &[0b1000_0000, 0, 0, 0b1000_0000, 0b0000_0001]);

    for r in rows.iter() {
        assert_eq!(r.low_count(), 1);
        assert_eq!(r.get_state(), Some(true));
    }
}

#[test]
fn settle_waits_around_each_row() {
    let (_matrix, mut scanner, _rows, delay) = setup::<5, 8>(ScanTiming::SECONDARY);
    block_on(scanner.scan());

    assert_eq!(delay.calls(), 10);
    assert_eq!(delay.total_micros(), 5 * (10 + 100));

    let (_matrix, mut scanner, _rows, delay) = setup::<5, 6>(ScanTiming::PRIMARY);
    block_on(scanner.scan());
    assert_eq!(delay.total_micros(), 5 * (100 + 100));
}

#[test]
fn read_error_counts_as_open() {
    let (matrix, rows, cols) = KeyMatrix::with_size(2, 3);
    let mut scanner: KeyScanner<Pin, Pin, TestDelay, 2, 3> =
        KeyScanner::new(arr(&rows), arr(&cols), TestDelay::default(), ScanTiming::PRIMARY);

    matrix.down(0, 1);
    matrix.down(1, 2);
    assert_eq!(block_on(scanner.scan()).rows(), &[0b010, 0b100]);

    cols[1].set_failing(true);
    assert_eq!(block_on(scanner.scan()).rows(), &[0b000, 0b100]);

    cols[1].set_failing(false);
    assert_eq!(block_on(scanner.scan()).rows(), &[0b010, 0b100]);
}

#[test]
fn row_masks_helpers() {
    let mut masks = RowMasks::<3>::default();
    assert!(!masks.any());
    masks.set(1, 3, true);
    assert!(masks.any());
    assert_eq!(masks.row(1), 0b1000);
    assert_eq!(masks, RowMasks::from_rows([0, 0b1000, 0]));
    masks.set(1, 3, false);
    assert!(!masks.any());
}
