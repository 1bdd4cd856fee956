// src/lcd/display.rs

//! Logical operations over the nibble driver.
//!
//! Thin and synchronous: every call blocks until its strobes complete or
//! fail. The display exclusively owns the bus transport for the process
//! lifetime.

use std::thread;

use log::debug;

use crate::error::LcdError;
use crate::io::i2c::I2cTransport;
use crate::lcd::commands::{CLEAR_DISPLAY, RETURN_HOME, SET_DDRAM_ADDR};
use crate::lcd::driver::{NibbleDriver, LONG_COMMAND_SETTLE};
use crate::lcd::geometry::DisplayGeometry;
use crate::lcd::pins::PinMap;

/// A character LCD, addressable by (row, column).
#[derive(Debug)]
pub struct LcdDisplay<B: I2cTransport> {
    driver: NibbleDriver<B>,
    geometry: DisplayGeometry,
}

impl<B: I2cTransport> LcdDisplay<B> {
    /// Initializes the controller on `bus` and wraps it with `geometry`.
    pub fn new(bus: B, pins: PinMap, geometry: DisplayGeometry) -> Result<Self, LcdError> {
        let driver = NibbleDriver::new(bus, pins)?;
        debug!(
            "LCD ready: {}x{} cells",
            geometry.rows(),
            geometry.cols()
        );
        Ok(Self { driver, geometry })
    }

    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    /// Raw command passthrough.
    pub fn command(&mut self, command: u8) -> Result<(), LcdError> {
        self.driver.send(command, true).map_err(LcdError::from)
    }

    /// Writes one character at the controller's current address.
    pub fn write_char(&mut self, ch: u8) -> Result<(), LcdError> {
        self.driver.send(ch, false).map_err(LcdError::from)
    }

    /// Writes a run of characters, relying on the controller's address
    /// auto-increment within this single call.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LcdError> {
        for &ch in bytes {
            self.write_char(ch)?;
        }
        Ok(())
    }

    /// Clears the display, honoring the controller's execution time.
    pub fn clear(&mut self) -> Result<(), LcdError> {
        self.command(CLEAR_DISPLAY)?;
        thread::sleep(LONG_COMMAND_SETTLE);
        Ok(())
    }

    /// Returns the cursor to the top-left cell.
    pub fn home(&mut self) -> Result<(), LcdError> {
        self.command(RETURN_HOME)?;
        thread::sleep(LONG_COMMAND_SETTLE);
        Ok(())
    }

    /// Moves the cursor to `(row, col)`, zero-based, with a single DDRAM
    /// address-set command. Out-of-range positions are rejected, never
    /// silently mapped to address 0.
    pub fn set_position(&mut self, row: usize, col: usize) -> Result<(), LcdError> {
        let address = self.geometry.ddram_address(row, col)?;
        self.command(SET_DDRAM_ADDR | address)
    }

    /// Sets the DDRAM address directly. Used by the terminal layer, which
    /// precomputes its own linear-to-DDRAM table.
    pub fn set_ddram_address(&mut self, address: u8) -> Result<(), LcdError> {
        self.command(SET_DDRAM_ADDR | address)
    }

    pub fn backlight_on(&mut self) -> Result<(), LcdError> {
        self.driver.set_backlight(true).map_err(LcdError::from)
    }

    pub fn backlight_off(&mut self) -> Result<(), LcdError> {
        self.driver.set_backlight(false).map_err(LcdError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::io::mock::MockBus;
    use crate::lcd::commands::FUNCTION_SET;

    fn display(bus: &MockBus) -> LcdDisplay<MockBus> {
        let pins = PinMap::new(2, 1, 0, 4, 5, 6, 7, 3).unwrap();
        let geometry = DisplayGeometry::new(4, 16).unwrap();
        LcdDisplay::new(bus.clone(), pins, geometry).unwrap()
    }

    /// Reassembles the command bytes sent after init, assuming the standard
    /// pin map (data on bits 4-7 means each frame's high nibble is the
    /// payload nibble).
    fn sent_bytes(frames: &[u8]) -> Vec<u8> {
        frames
            .chunks(6)
            .map(|strobes| (strobes[0] & 0xF0) | (strobes[3] >> 4))
            .collect()
    }

    #[test]
    fn set_position_emits_one_ddram_command() {
        let bus = MockBus::new();
        let mut lcd = display(&bus);
        bus.take_frames();

        lcd.set_position(2, 5).unwrap();
        let frames = bus.frames();
        assert_eq!(frames.len(), 6, "exactly one command");
        assert_eq!(sent_bytes(&frames), vec![SET_DDRAM_ADDR | (0x10 + 5)]);
    }

    #[test]
    fn set_position_rejects_out_of_range() {
        let bus = MockBus::new();
        let mut lcd = display(&bus);
        bus.take_frames();

        let err = lcd.set_position(4, 0).unwrap_err();
        assert!(matches!(
            err,
            LcdError::Config(ConfigError::PositionOutOfRange { row: 4, .. })
        ));
        assert!(bus.frames().is_empty(), "nothing reaches the bus");
    }

    #[test]
    fn command_passthrough_sends_the_raw_byte() {
        let bus = MockBus::new();
        let mut lcd = display(&bus);
        bus.take_frames();

        lcd.command(FUNCTION_SET | 0x08).unwrap();
        assert_eq!(sent_bytes(&bus.frames()), vec![0x28]);
    }

    #[test]
    fn backlight_toggle_emits_one_frame_immediately() {
        let bus = MockBus::new();
        let mut lcd = display(&bus);
        bus.take_frames();

        lcd.backlight_on().unwrap();
        assert_eq!(bus.take_frames(), vec![0b0000_1000], "bit 3 high");
        lcd.backlight_off().unwrap();
        assert_eq!(bus.take_frames(), vec![0x00]);
    }
}
