//! Panel geometry and coordinate mapping
//!
//! Coordinates start bottom-left: row 0 is the bottom row, column 0 the
//! left-most column.
//!
//! Buttons and LEDs disagree on bit order within a row byte, following the
//! board wiring:
//!
//! ```text
//! column      0   1   2   3   4   5   6   7
//! button bit  0   1   2   3   4   5   6   7    (LSB = left-most)
//! LED bit     7   6   5   4   3   2   1   0    (MSB = left-most)
//! ```
//!
//! Confirm against the physical wiring before changing either mapping.

/// Number of button/LED rows
pub const ROWS: usize = 5;

/// Number of button/LED columns (one shift register byte per row)
pub const COLS: usize = 8;

/// Number of potentiometers behind the analog multiplexer
pub const POT_COUNT: usize = 6;

/// Number of multiplexer channel-select lines (4051: 3 lines, 8 channels)
pub const MUX_SELECT_BITS: usize = 3;

/// Bit position inside a LED row byte for column `col`
#[inline]
pub const fn led_bit(col: u8) -> u8 {
    (COLS as u8 - 1) - col
}

/// Mask selecting column `col` inside a LED row byte
#[inline]
pub const fn led_mask(col: u8) -> u8 {
    1 << led_bit(col)
}

/// Mask selecting column `col` inside a button row byte
#[inline]
pub const fn button_mask(col: u8) -> u8 {
    1 << col
}

/// Precondition check for a cell coordinate
///
/// Panics in debug builds. Release builds rely on array bounds checks for
/// the row; an out-of-range column is unspecified.
#[inline]
pub fn check_cell(row: u8, col: u8) {
    debug_assert!((row as usize) < ROWS, "row {} out of range", row);
    debug_assert!((col as usize) < COLS, "col {} out of range", col);
}

/// Precondition check for a potentiometer index
#[inline]
pub fn check_pot(pot: u8) {
    debug_assert!((pot as usize) < POT_COUNT, "pot {} out of range", pot);
}
