// src/lcd/driver.rs

//! The 4-bit nibble protocol.
//!
//! The controller sits behind an 8-bit I/O expander, so every logical byte
//! becomes two expander frames (high nibble first, then low), each latched by
//! an enable strobe. The strobe is three writes - frame, frame with enable
//! high, frame again - because the expander is not synchronized to any clock
//! the controller can poll; the three writes guarantee a full rising and
//! falling enable edge under worst-case bus timing.
//!
//! Backlight state shares the same output byte as everything else, so it is
//! an explicit field here and re-applied to every frame, never ambient state.

use std::thread;
use std::time::Duration;

use log::{debug, trace};

use crate::error::{LcdError, TransportError};
use crate::io::i2c::I2cTransport;
use crate::lcd::commands::{
    DisplayControl, EntryMode, FunctionSet, CLEAR_DISPLAY, DISPLAY_CONTROL, ENTRY_MODE,
    FUNCTION_SET,
};
use crate::lcd::pins::{set_pin, PinMap};

/// Power-on settle floors from the controller datasheet. These are timing
/// minimums for a cold controller, not tunables.
const POWER_ON_SETTLE: [Duration; 3] = [
    Duration::from_millis(15),
    Duration::from_micros(4100),
    Duration::from_micros(100),
];
/// Settle after the switch to 4-bit mode.
const MODE_SWITCH_SETTLE: Duration = Duration::from_micros(100);
/// Clear and home take the controller ~1.52 ms to execute.
pub(crate) const LONG_COMMAND_SETTLE: Duration = Duration::from_millis(2);

/// Function-set nibble selecting the 8-bit interface (D5|D4 high).
const NIBBLE_8BIT_MODE: u8 = 0x3;
/// Function-set nibble selecting the 4-bit interface (D5 high).
const NIBBLE_4BIT_MODE: u8 = 0x2;

/// Bit-level driver for an HD44780 in 4-bit mode behind an I/O expander.
///
/// Construction runs the mandated power-on sequence; a driver that failed
/// init is never returned. Not re-entrant: the caller owns serialization.
#[derive(Debug)]
pub struct NibbleDriver<B: I2cTransport> {
    bus: B,
    pins: PinMap,
    backlight: bool,
}

impl<B: I2cTransport> NibbleDriver<B> {
    /// Takes ownership of the transport and initializes the controller.
    pub fn new(bus: B, pins: PinMap) -> Result<Self, LcdError> {
        let mut driver = Self {
            bus,
            pins,
            backlight: false,
        };
        driver.init().map_err(LcdError::Init)?;
        Ok(driver)
    }

    /// Builds the expander frame for one nibble: the nibble's four bits
    /// mapped through the data pins, register-select high iff this is
    /// character data. Read/write stays low; this driver only writes.
    fn nibble_frame(&self, nibble: u8, is_command: bool) -> u8 {
        let mut frame = 0u8;
        for (bit, &pin) in self.pins.data.iter().enumerate() {
            frame = set_pin(frame, pin, nibble & (1 << bit) != 0);
        }
        set_pin(frame, self.pins.register_select, !is_command)
    }

    /// Latches `frame` into the controller with one enable pulse.
    ///
    /// Fails on the first write error; a pulse never resumes after a partial
    /// transfer, and nothing here retries.
    fn strobe(&mut self, frame: u8) -> Result<(), TransportError> {
        let frame = set_pin(frame, self.pins.backlight, self.backlight);
        self.bus.write_byte(frame)?;
        self.bus.write_byte(set_pin(frame, self.pins.enable, true))?;
        self.bus.write_byte(frame)
    }

    /// Sends a full byte as two strobed nibble frames, high nibble first.
    /// The order is fixed by the controller's 4-bit-mode contract.
    pub fn send(&mut self, value: u8, is_command: bool) -> Result<(), TransportError> {
        trace!(
            "send {:#04x} as {}",
            value,
            if is_command { "command" } else { "data" }
        );
        let high = self.nibble_frame(value >> 4, is_command);
        self.strobe(high)?;
        let low = self.nibble_frame(value & 0x0F, is_command);
        self.strobe(low)
    }

    /// Stores the backlight flag and pushes one frame so the change takes
    /// effect immediately, with no other command pending.
    pub fn set_backlight(&mut self, on: bool) -> Result<(), TransportError> {
        self.backlight = on;
        self.bus.write_byte(set_pin(0x00, self.pins.backlight, on))
    }

    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// The controller's power-on dance, run exactly once at construction.
    ///
    /// A cold controller wakes up in 8-bit mode with unknown state: pulse the
    /// 8-bit function-set nibble three times with the datasheet's settle
    /// floors, drop to 4-bit mode, then program the operating mode with full
    /// commands.
    fn init(&mut self) -> Result<(), TransportError> {
        debug!("Running HD44780 power-on sequence");

        let wake = self.nibble_frame(NIBBLE_8BIT_MODE, true);
        for settle in POWER_ON_SETTLE {
            self.strobe(wake)?;
            thread::sleep(settle);
        }

        let switch = self.nibble_frame(NIBBLE_4BIT_MODE, true);
        self.strobe(switch)?;
        thread::sleep(MODE_SWITCH_SETTLE);

        self.send(FUNCTION_SET | FunctionSet::TWO_LINES.bits(), true)?;
        self.send(
            DISPLAY_CONTROL | (DisplayControl::DISPLAY_ON | DisplayControl::CURSOR_ON).bits(),
            true,
        )?;
        self.send(CLEAR_DISPLAY, true)?;
        thread::sleep(LONG_COMMAND_SETTLE);
        self.send(ENTRY_MODE | EntryMode::INCREMENT.bits(), true)?;

        debug!("Controller initialized: 4-bit, two lines, display and cursor on");
        Ok(())
    }
}
