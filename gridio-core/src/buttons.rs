//! Button matrix state and edge detection
//!
//! Debouncing is done by rate-limiting whole-matrix scans rather than by
//! filtering individual cells: a scan is only admitted once
//! `debounce_ms` has passed since the last admitted scan, which is longer
//! than a typical switch bounce. Each admitted scan is compared against the
//! previous one and every changed bit becomes a press or release.

use crate::events::GridListener;
use crate::geometry::{button_mask, check_cell, COLS, ROWS};

/// Default minimum time between admitted scans (ms)
pub const DEFAULT_DEBOUNCE_MS: u32 = 10;

/// Direction of a button transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// 0 → 1
    Pressed,
    /// 1 → 0
    Released,
}

impl Edge {
    /// Classify a bit transition, or None if the bit did not change
    pub fn between(previous: bool, current: bool) -> Option<Self> {
        match (previous, current) {
            (false, true) => Some(Edge::Pressed),
            (true, false) => Some(Edge::Released),
            _ => None,
        }
    }
}

/// Rate limiter admitting at most one scan per interval
#[derive(Debug, Clone)]
pub struct DebounceGate {
    interval_ms: u32,
    /// Time of the last admitted scan, None before the first one
    last_accepted_ms: Option<u32>,
}

impl DebounceGate {
    /// Create a gate that is open for the first scan
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_accepted_ms: None,
        }
    }

    /// Check if a scan at `now_ms` would be admitted
    ///
    /// Uses wrapping arithmetic so clock rollover does not stall the gate.
    pub fn is_open(&self, now_ms: u32) -> bool {
        match self.last_accepted_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.interval_ms,
        }
    }

    /// Record a scan admitted at `now_ms`
    pub fn accept(&mut self, now_ms: u32) {
        self.last_accepted_ms = Some(now_ms);
    }

    /// Admit and record a scan if the gate is open
    pub fn try_accept(&mut self, now_ms: u32) -> bool {
        if self.is_open(now_ms) {
            self.accept(now_ms);
            true
        } else {
            false
        }
    }

    /// Time of the last admitted scan
    pub fn last_accepted(&self) -> Option<u32> {
        self.last_accepted_ms
    }

    /// Configured interval
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

/// Current and previous sample of every row, plus press timestamps
///
/// Row bytes use the button bit order: bit `col` is column `col`.
#[derive(Debug, Clone)]
pub struct ButtonState {
    current: [u8; ROWS],
    previous: [u8; ROWS],
    pressed_at_ms: [[u32; COLS]; ROWS],
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonState {
    /// Create with every button released
    pub const fn new() -> Self {
        Self {
            current: [0; ROWS],
            previous: [0; ROWS],
            pressed_at_ms: [[0; COLS]; ROWS],
        }
    }

    /// Store a fresh sample for `row` and report any edges
    ///
    /// The old sample becomes the previous one. Presses record `now_ms` as
    /// the cell's press time; releases report the time since then. Events
    /// within the row come out in column order.
    ///
    /// Returns the number of edges reported.
    pub fn update_row<L>(&mut self, row: usize, sample: u8, now_ms: u32, listener: &mut L) -> u8
    where
        L: GridListener + ?Sized,
    {
        self.previous[row] = self.current[row];
        self.current[row] = sample;

        let changed = self.previous[row] ^ sample;
        if changed == 0 {
            return 0;
        }

        let mut edges = 0;
        for col in 0..COLS as u8 {
            let mask = button_mask(col);
            if changed & mask == 0 {
                continue;
            }

            let was = self.previous[row] & mask != 0;
            let is = sample & mask != 0;
            match Edge::between(was, is) {
                Some(Edge::Pressed) => {
                    self.pressed_at_ms[row][col as usize] = now_ms;
                    listener.button_down(row as u8, col);
                }
                Some(Edge::Released) => {
                    let held_ms = now_ms.wrapping_sub(self.pressed_at_ms[row][col as usize]);
                    listener.button_up(row as u8, col, held_ms);
                }
                None => continue,
            }
            edges += 1;
        }
        edges
    }

    /// Check if a button was down in the last admitted scan
    pub fn is_pressed(&self, row: u8, col: u8) -> bool {
        check_cell(row, col);
        self.current[row as usize] & button_mask(col) != 0
    }

    /// Raw byte of the last admitted scan for `row`
    pub fn row(&self, row: u8) -> u8 {
        self.current[row as usize]
    }

    /// Raw byte of the scan before the last one for `row`
    pub fn previous_row(&self, row: u8) -> u8 {
        self.previous[row as usize]
    }

    /// Time the button at (row, col) was last pressed
    pub fn pressed_at(&self, row: u8, col: u8) -> u32 {
        check_cell(row, col);
        self.pressed_at_ms[row as usize][col as usize]
    }

    /// Number of buttons currently down
    pub fn pressed_count(&self) -> u32 {
        self.current.iter().map(|row| row.count_ones()).sum()
    }
}
