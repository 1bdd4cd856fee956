// src/lcd/pins.rs

//! Mapping of the controller's logical signal lines onto the I/O expander's
//! eight output bits.
//!
//! The expander presents one byte to the LCD; which bit carries which signal
//! is a property of the backpack board's wiring, so it is configuration, not
//! a constant. All eight assignments must be distinct and in range; an
//! overlapping map would drive two signals from one bit and produce undefined
//! hardware behavior, so construction rejects it outright.

use crate::error::ConfigError;

/// Sets or clears bit `pin` in `frame`. Pure; used to build every bus
/// transaction payload.
#[inline]
pub fn set_pin(frame: u8, pin: u8, value: bool) -> u8 {
    if value {
        frame | (1 << pin)
    } else {
        frame & !(1 << pin)
    }
}

/// Validated assignment of logical signals to expander bit positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinMap {
    /// Enable strobe line.
    pub enable: u8,
    /// Read/write select line (held low; this driver only writes).
    pub read_write: u8,
    /// Register select line: low for instructions, high for character data.
    pub register_select: u8,
    /// Data lines D4..D7, least significant nibble bit first.
    pub data: [u8; 4],
    /// Backlight control line.
    pub backlight: u8,
}

impl PinMap {
    /// Builds a pin map, rejecting out-of-range or overlapping assignments.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        enable: u8,
        read_write: u8,
        register_select: u8,
        data4: u8,
        data5: u8,
        data6: u8,
        data7: u8,
        backlight: u8,
    ) -> Result<Self, ConfigError> {
        let named: [(&'static str, u8); 8] = [
            ("enable", enable),
            ("read_write", read_write),
            ("register_select", register_select),
            ("data4", data4),
            ("data5", data5),
            ("data6", data6),
            ("data7", data7),
            ("backlight", backlight),
        ];

        let mut claimed: [Option<&'static str>; 8] = [None; 8];
        for (name, bit) in named {
            if bit > 7 {
                return Err(ConfigError::PinOutOfRange { name, bit });
            }
            if let Some(first) = claimed[bit as usize] {
                return Err(ConfigError::PinConflict {
                    first,
                    second: name,
                    bit,
                });
            }
            claimed[bit as usize] = Some(name);
        }

        Ok(Self {
            enable,
            read_write,
            register_select,
            data: [data4, data5, data6, data7],
            backlight,
        })
    }
}
