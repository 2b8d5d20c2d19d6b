//! Simulated panel hardware for driver tests
//!
//! Models the button register cascade, the LED register chain, the
//! multiplexer with its ADC, and a manually advanced clock. All handles
//! share one [`SimBoard`] through a `RefCell`.

use core::cell::RefCell;

use gridio_core::geometry::{COLS, MUX_SELECT_BITS, POT_COUNT, ROWS};
use gridio_hal::{AnalogInput, Clock, DelayUs, InputPin, OutputPin};
use heapless::Vec;

use crate::panel::GridPins;

/// Latched LED frames kept before new ones are dropped
pub const MAX_FRAMES: usize = 16;

/// Output line a [`SimPin`] drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    ButtonClock,
    ButtonLatch,
    LedData,
    LedClock,
    LedLatch,
    MuxSelect(u8),
}

/// State of the simulated board
pub struct SimBoard {
    /// Buttons held down, bit `col` of each row
    pub buttons: [u8; ROWS],
    /// Raw ADC reading of each pot
    pub pots: [u16; POT_COUNT],
    pub now_ms: u32,
    /// Total busy-wait requested
    pub delayed_us: u32,
    /// Row bytes seen by the LED chain at each latch, bottom row first
    pub frames: Vec<[u8; ROWS], MAX_FRAMES>,
    /// Number of times the button cascade was switched to shift mode
    pub button_scans: u32,
    snapshot: [u8; ROWS],
    stream_pos: usize,
    button_clock: bool,
    button_latch: bool,
    led_data: bool,
    led_clock: bool,
    led_latch: bool,
    led_bits: Vec<bool, 64>,
    mux: [bool; MUX_SELECT_BITS],
}

impl SimBoard {
    pub fn new() -> Self {
        Self {
            buttons: [0; ROWS],
            pots: [0; POT_COUNT],
            now_ms: 0,
            delayed_us: 0,
            frames: Vec::new(),
            button_scans: 0,
            snapshot: [0; ROWS],
            stream_pos: 0,
            button_clock: false,
            button_latch: true,
            led_data: false,
            led_clock: false,
            led_latch: true,
            led_bits: Vec::new(),
            mux: [false; MUX_SELECT_BITS],
        }
    }

    /// Hold or release one button
    pub fn press(&mut self, row: usize, col: usize, down: bool) {
        if down {
            self.buttons[row] |= 1 << col;
        } else {
            self.buttons[row] &= !(1 << col);
        }
    }

    /// Channel currently addressed by the multiplexer
    pub fn mux_channel(&self) -> u8 {
        self.mux
            .iter()
            .enumerate()
            .fold(0, |acc, (bit, &high)| acc | (high as u8) << bit)
    }

    pub fn last_frame(&self) -> Option<[u8; ROWS]> {
        self.frames.last().copied()
    }

    fn drive(&mut self, line: Line, high: bool) {
        match line {
            Line::ButtonLatch => {
                if self.button_latch && !high {
                    self.snapshot = self.buttons;
                    self.stream_pos = 0;
                    self.button_scans += 1;
                }
                self.button_latch = high;
            }
            Line::ButtonClock => {
                if !self.button_clock && high && !self.button_latch {
                    self.stream_pos += 1;
                }
                self.button_clock = high;
            }
            Line::LedData => self.led_data = high,
            Line::LedClock => {
                if !self.led_clock && high {
                    let _ = self.led_bits.push(self.led_data);
                }
                self.led_clock = high;
            }
            Line::LedLatch => {
                if self.led_latch && !high {
                    self.led_bits.clear();
                }
                if !self.led_latch && high {
                    let frame = self.decode_led_bits();
                    let _ = self.frames.push(frame);
                }
                self.led_latch = high;
            }
            Line::MuxSelect(bit) => self.mux[bit as usize] = high,
        }
    }

    /// Bit on the cascade's serial output: top row first, bit 0 first
    fn button_data(&self) -> bool {
        let row_from_top = self.stream_pos / COLS;
        if row_from_top >= ROWS {
            return false;
        }
        let row = ROWS - 1 - row_from_top;
        let bit = self.stream_pos % COLS;
        self.snapshot[row] >> bit & 1 != 0
    }

    /// Row bytes from the shifted bits, each byte sent bit 0 first
    fn decode_led_bits(&self) -> [u8; ROWS] {
        let mut rows = [0u8; ROWS];
        for (i, &bit) in self.led_bits.iter().enumerate().take(ROWS * COLS) {
            if bit {
                rows[i / COLS] |= 1 << (i % COLS);
            }
        }
        rows
    }
}

pub struct SimPin<'a> {
    board: &'a RefCell<SimBoard>,
    line: Line,
}

impl OutputPin for SimPin<'_> {
    fn set_high(&mut self) {
        self.board.borrow_mut().drive(self.line, true);
    }

    fn set_low(&mut self) {
        self.board.borrow_mut().drive(self.line, false);
    }
}

/// Serial output of the button cascade
pub struct SimData<'a>(&'a RefCell<SimBoard>);

impl InputPin for SimData<'_> {
    fn is_high(&mut self) -> bool {
        self.0.borrow().button_data()
    }
}

/// ADC behind the multiplexer
pub struct SimAdc<'a>(&'a RefCell<SimBoard>);

impl AnalogInput for SimAdc<'_> {
    fn sample(&mut self) -> u16 {
        let board = self.0.borrow();
        board
            .pots
            .get(board.mux_channel() as usize)
            .copied()
            .unwrap_or(0)
    }
}

pub struct SimClock<'a>(&'a RefCell<SimBoard>);

impl Clock for SimClock<'_> {
    fn now_ms(&self) -> u32 {
        self.0.borrow().now_ms
    }
}

pub struct SimDelay<'a>(&'a RefCell<SimBoard>);

impl DelayUs for SimDelay<'_> {
    fn delay_us(&mut self, us: u32) {
        self.0.borrow_mut().delayed_us += us;
    }
}

pub fn pin(board: &RefCell<SimBoard>, line: Line) -> SimPin<'_> {
    SimPin { board, line }
}

pub fn pins(board: &RefCell<SimBoard>) -> GridPins<SimData<'_>, SimPin<'_>, SimAdc<'_>> {
    GridPins {
        button_data: SimData(board),
        button_clock: pin(board, Line::ButtonClock),
        button_latch: pin(board, Line::ButtonLatch),
        led_data: pin(board, Line::LedData),
        led_clock: pin(board, Line::LedClock),
        led_latch: pin(board, Line::LedLatch),
        mux_select: [
            pin(board, Line::MuxSelect(0)),
            pin(board, Line::MuxSelect(1)),
            pin(board, Line::MuxSelect(2)),
        ],
        mux_input: SimAdc(board),
    }
}

pub fn clock(board: &RefCell<SimBoard>) -> SimClock<'_> {
    SimClock(board)
}

pub fn delay(board: &RefCell<SimBoard>) -> SimDelay<'_> {
    SimDelay(board)
}

pub fn data(board: &RefCell<SimBoard>) -> SimData<'_> {
    SimData(board)
}

pub fn adc(board: &RefCell<SimBoard>) -> SimAdc<'_> {
    SimAdc(board)
}
