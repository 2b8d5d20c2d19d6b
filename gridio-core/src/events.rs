//! Panel events and listener dispatch
//!
//! Events are delivered synchronously, from inside the read pass that
//! detected them. A consumer either implements [`GridListener`] itself,
//! registers plain function pointers through [`Callbacks`], or collects
//! events into an [`EventQueue`] and drains it after `read()`.

use heapless::Deque;

/// Something the host should know about after a read pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GridEvent {
    /// Button went from released to pressed
    ButtonDown { row: u8, col: u8 },
    /// Button went from pressed to released after `held_ms`
    ButtonUp { row: u8, col: u8, held_ms: u32 },
    /// Potentiometer moved to a new quantized level
    ///
    /// `value` is the full-resolution rescaled reading (0-1023).
    PotChange { pot: u8, value: u16 },
}

impl GridEvent {
    /// Returns true for button press/release events
    pub fn is_button(&self) -> bool {
        matches!(
            self,
            GridEvent::ButtonDown { .. } | GridEvent::ButtonUp { .. }
        )
    }

    /// Matrix coordinate of a button event
    pub fn cell(&self) -> Option<(u8, u8)> {
        match *self {
            GridEvent::ButtonDown { row, col } | GridEvent::ButtonUp { row, col, .. } => {
                Some((row, col))
            }
            GridEvent::PotChange { .. } => None,
        }
    }

    /// Forward this event to a listener
    pub fn dispatch<L: GridListener + ?Sized>(self, listener: &mut L) {
        match self {
            GridEvent::ButtonDown { row, col } => listener.button_down(row, col),
            GridEvent::ButtonUp { row, col, held_ms } => listener.button_up(row, col, held_ms),
            GridEvent::PotChange { pot, value } => listener.pot_change(pot, value),
        }
    }
}

/// Receiver for panel events
///
/// Every method defaults to a no-op, so implementors only override what
/// they care about.
pub trait GridListener {
    /// A button was pressed
    fn button_down(&mut self, _row: u8, _col: u8) {}

    /// A button was released after being held for `held_ms`
    fn button_up(&mut self, _row: u8, _col: u8, _held_ms: u32) {}

    /// A potentiometer changed; `value` is 0-1023
    fn pot_change(&mut self, _pot: u8, _value: u16) {}
}

/// Discards every event
impl GridListener for () {}

impl<L: GridListener + ?Sized> GridListener for &mut L {
    fn button_down(&mut self, row: u8, col: u8) {
        (**self).button_down(row, col)
    }

    fn button_up(&mut self, row: u8, col: u8, held_ms: u32) {
        (**self).button_up(row, col, held_ms)
    }

    fn pot_change(&mut self, pot: u8, value: u16) {
        (**self).pot_change(pot, value)
    }
}

/// Button-down handler
pub type ButtonDownFn = fn(row: u8, col: u8);

/// Button-up handler
pub type ButtonUpFn = fn(row: u8, col: u8, held_ms: u32);

/// Pot-change handler
pub type PotChangeFn = fn(pot: u8, value: u16);

/// Three optional function-pointer slots
///
/// An empty slot swallows its events.
#[derive(Debug, Clone, Copy, Default)]
pub struct Callbacks {
    button_down: Option<ButtonDownFn>,
    button_up: Option<ButtonUpFn>,
    pot_change: Option<PotChangeFn>,
}

impl Callbacks {
    /// Create with every slot empty
    pub const fn new() -> Self {
        Self {
            button_down: None,
            button_up: None,
            pot_change: None,
        }
    }

    /// Install the button-down handler, replacing any previous one
    pub fn set_button_down_listener(&mut self, handler: ButtonDownFn) {
        self.button_down = Some(handler);
    }

    /// Install the button-up handler, replacing any previous one
    pub fn set_button_up_listener(&mut self, handler: ButtonUpFn) {
        self.button_up = Some(handler);
    }

    /// Install the pot-change handler, replacing any previous one
    pub fn set_pot_change_listener(&mut self, handler: PotChangeFn) {
        self.pot_change = Some(handler);
    }

    /// Empty all slots
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Check whether any slot is filled
    pub fn is_empty(&self) -> bool {
        self.button_down.is_none() && self.button_up.is_none() && self.pot_change.is_none()
    }
}

impl GridListener for Callbacks {
    fn button_down(&mut self, row: u8, col: u8) {
        if let Some(handler) = self.button_down {
            handler(row, col);
        }
    }

    fn button_up(&mut self, row: u8, col: u8, held_ms: u32) {
        if let Some(handler) = self.button_up {
            handler(row, col, held_ms);
        }
    }

    fn pot_change(&mut self, pot: u8, value: u16) {
        if let Some(handler) = self.pot_change {
            handler(pot, value);
        }
    }
}

/// Bounded FIFO of events for hosts that prefer polling
///
/// When full, new events are dropped and counted.
#[derive(Debug)]
pub struct EventQueue<const N: usize> {
    events: Deque<GridEvent, N>,
    dropped: u32,
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventQueue<N> {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
            dropped: 0,
        }
    }

    /// Append an event
    ///
    /// Returns false if the queue was full and the event was dropped.
    pub fn push(&mut self, event: GridEvent) -> bool {
        match self.events.push_back(event) {
            Ok(()) => true,
            Err(_event) => {
                self.dropped = self.dropped.saturating_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("event queue full, dropping {}", _event);
                false
            }
        }
    }

    /// Take the oldest event
    pub fn pop(&mut self) -> Option<GridEvent> {
        self.events.pop_front()
    }

    /// Take events oldest-first until the queue is empty
    pub fn drain(&mut self) -> impl Iterator<Item = GridEvent> + '_ {
        core::iter::from_fn(move || self.events.pop_front())
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if no events are queued
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events lost to overflow since creation or the last clear
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Discard queued events and reset the drop counter
    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }
}

impl<const N: usize> GridListener for EventQueue<N> {
    fn button_down(&mut self, row: u8, col: u8) {
        self.push(GridEvent::ButtonDown { row, col });
    }

    fn button_up(&mut self, row: u8, col: u8, held_ms: u32) {
        self.push(GridEvent::ButtonUp { row, col, held_ms });
    }

    fn pot_change(&mut self, pot: u8, value: u16) {
        self.push(GridEvent::PotChange { pot, value });
    }
}
