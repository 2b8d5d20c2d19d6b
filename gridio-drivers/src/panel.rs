//! Panel coordinator
//!
//! [`GridPanel`] owns every pin, the clock, the delay and the listener.
//! Hosts call [`GridPanel::read`] at the start of each cycle and
//! [`GridPanel::write`] at the end.
//!
//! # Example
//!
//! ```ignore
//! let mut panel = GridPanel::new(pins, clock, delay, GridConfig::default(), EventQueue::<32>::new())?;
//! loop {
//!     panel.read();
//!     while let Some(event) = panel.listener_mut().pop() {
//!         // react to the event
//!     }
//!     panel.set_led(0, 3, true);
//!     panel.write();
//! }
//! ```

use gridio_core::config::{ConfigError, GridConfig};
use gridio_core::geometry::MUX_SELECT_BITS;
use gridio_core::leds::FrameCounter;
use gridio_core::GridListener;
use gridio_hal::{AnalogInput, Clock, DelayUs, InputPin, OutputPin};

use crate::buttons::ButtonMatrix;
use crate::leds::LedMatrix;
use crate::pots::PotReader;

/// Every line the panel is wired to
pub struct GridPins<I, O, A> {
    /// Serial output of the button cascade
    pub button_data: I,
    pub button_clock: O,
    /// Low = shift, high = capture
    pub button_latch: O,
    pub led_data: O,
    pub led_clock: O,
    /// Rising edge shows the shifted rows
    pub led_latch: O,
    /// Multiplexer channel select, least significant bit first
    pub mux_select: [O; MUX_SELECT_BITS],
    /// Multiplexer common output
    pub mux_input: A,
}

/// Button matrix, LED matrix and pot bank driven as one panel
pub struct GridPanel<I, O, A, T, D, L = ()> {
    buttons: ButtonMatrix<I, O>,
    leds: LedMatrix<O>,
    pots: PotReader<O, A>,
    clock: T,
    delay: D,
    listener: L,
    config: GridConfig,
}

impl<I, O, A, T, D, L> GridPanel<I, O, A, T, D, L>
where
    I: InputPin,
    O: OutputPin,
    A: AnalogInput,
    T: Clock,
    D: DelayUs,
    L: GridListener,
{
    /// Take ownership of the hardware and capture the boot state
    ///
    /// The initial read reports nothing, so buttons held or pots away
    /// from zero at power-up do not produce events.
    pub fn new(pins: GridPins<I, O, A>, clock: T, delay: D, config: GridConfig, listener: L) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            #[cfg(feature = "defmt")]
            defmt::warn!("rejected grid config: {}", e);
            return Err(e);
        }
        let range = config.analog_range()?;

        let GridPins {
            button_data,
            button_clock,
            button_latch,
            led_data,
            led_clock,
            led_latch,
            mux_select,
            mux_input,
        } = pins;

        let mut panel = Self {
            buttons: ButtonMatrix::new(
                button_data,
                button_clock,
                button_latch,
                config.debounce_gate(),
                config.shift_settle_us,
            ),
            leds: LedMatrix::new(led_data, led_clock, led_latch),
            pots: PotReader::new(mux_select, mux_input, range, config.pot_filter()),
            clock,
            delay,
            listener,
            config,
        };

        let now_ms = panel.clock.now_ms();
        panel.buttons.scan(now_ms, &mut panel.delay, &mut ());
        panel.pots.read(&mut ());

        #[cfg(feature = "defmt")]
        defmt::info!(
            "grid panel ready: {} buttons down, debounce {}ms",
            panel.buttons.state().pressed_count(),
            config.debounce_ms
        );

        Ok(panel)
    }

    /// Sample buttons and pots, reporting changes to the listener
    ///
    /// Button sampling is skipped while the debounce interval since the
    /// last accepted scan has not elapsed; pots are read every time.
    pub fn read(&mut self) {
        let now_ms = self.clock.now_ms();
        self.buttons.scan(now_ms, &mut self.delay, &mut self.listener);
        self.pots.read(&mut self.listener);
    }

    /// Push the LED state out and advance the blink frame
    pub fn write(&mut self) {
        self.leds.write();
    }

    /// Turn one LED on or off; takes effect on the next write
    pub fn set_led(&mut self, row: u8, col: u8, on: bool) {
        self.leds.rows_mut().set(row, col, on);
    }

    /// Replace a whole LED row; column 0 is the most significant bit
    pub fn set_led_row(&mut self, row: u8, bits: u8) {
        self.leds.rows_mut().set_row(row, bits);
    }

    /// Stored state of one LED
    pub fn led(&self, row: u8, col: u8) -> bool {
        self.leds.rows().get(row, col)
    }

    /// Stored LED row byte
    pub fn led_row(&self, row: u8) -> u8 {
        self.leds.rows().row(row)
    }

    /// Turn every LED off
    pub fn clear_leds(&mut self) {
        self.leds.rows_mut().clear();
    }

    /// Check if a button was down in the last accepted scan
    pub fn get_button(&self, row: u8, col: u8) -> bool {
        self.buttons.state().is_pressed(row, col)
    }

    /// Button row byte from the last accepted scan; column 0 is bit 0
    pub fn button_row(&self, row: u8) -> u8 {
        self.buttons.state().row(row)
    }

    /// Last accepted quantized level of a pot
    pub fn pot_level(&self, pot: u8) -> u16 {
        self.pots.level(pot)
    }

    /// Blink frame the next write will show
    pub fn frame(&self) -> FrameCounter {
        self.leds.frame()
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Swap in a new listener, returning the old one
    pub fn set_listener(&mut self, listener: L) -> L {
        core::mem::replace(&mut self.listener, listener)
    }

    /// Tear the panel down and give the hardware back
    pub fn release(self) -> (GridPins<I, O, A>, T, D, L) {
        let (button_data, button_clock, button_latch) = self.buttons.release();
        let (led_data, led_clock, led_latch) = self.leds.release();
        let (mux_select, mux_input) = self.pots.release();
        let pins = GridPins {
            button_data,
            button_clock,
            button_latch,
            led_data,
            led_clock,
            led_latch,
            mux_select,
            mux_input,
        };
        (pins, self.clock, self.delay, self.listener)
    }
}
