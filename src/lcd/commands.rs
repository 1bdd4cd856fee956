// src/lcd/commands.rs

//! HD44780 instruction opcodes and their option bits.
//!
//! Option bits are modeled as `bitflags` sets so callers compose commands as
//! `DISPLAY_CONTROL | (DisplayControl::DISPLAY_ON | DisplayControl::CURSOR_ON).bits()`
//! instead of juggling raw masks.

use bitflags::bitflags;

/// Clear the display and reset the address counter. Long-running: the
/// controller needs about 1.52 ms before it accepts the next instruction.
pub const CLEAR_DISPLAY: u8 = 0x01;
/// Return the cursor to address 0. Long-running like [`CLEAR_DISPLAY`].
pub const RETURN_HOME: u8 = 0x02;
/// Entry mode set; see [`EntryMode`].
pub const ENTRY_MODE: u8 = 0x04;
/// Display on/off control; see [`DisplayControl`].
pub const DISPLAY_CONTROL: u8 = 0x08;
/// Cursor or display shift.
pub const CURSOR_SHIFT: u8 = 0x10;
/// Function set; see [`FunctionSet`].
pub const FUNCTION_SET: u8 = 0x20;
/// Set the DDRAM address; the low 7 bits are the address.
pub const SET_DDRAM_ADDR: u8 = 0x80;

bitflags! {
    /// Option bits for [`ENTRY_MODE`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EntryMode: u8 {
        /// Advance the address counter after each write.
        const INCREMENT = 0x02;
        /// Shift the whole display instead of the cursor.
        const DISPLAY_SHIFT = 0x01;
    }
}

bitflags! {
    /// Option bits for [`DISPLAY_CONTROL`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DisplayControl: u8 {
        const DISPLAY_ON = 0x04;
        const CURSOR_ON = 0x02;
        const BLINK_ON = 0x01;
    }
}

bitflags! {
    /// Option bits for [`FUNCTION_SET`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FunctionSet: u8 {
        /// 8-bit interface (cleared selects the 4-bit interface).
        const EIGHT_BIT = 0x10;
        /// Two-line display addressing.
        const TWO_LINES = 0x08;
        /// 5x10 dot font. Defined for completeness; never enabled here.
        const DOTS_5X10 = 0x04;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composed_commands_match_datasheet_encoding() {
        assert_eq!(
            FUNCTION_SET | FunctionSet::TWO_LINES.bits(),
            0x28,
            "4-bit, two-line function set"
        );
        assert_eq!(
            DISPLAY_CONTROL
                | (DisplayControl::DISPLAY_ON | DisplayControl::CURSOR_ON).bits(),
            0x0E
        );
        assert_eq!(ENTRY_MODE | EntryMode::INCREMENT.bits(), 0x06);
    }
}
