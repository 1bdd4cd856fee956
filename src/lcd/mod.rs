//! The LCD stack: pin mapping, nibble protocol, and logical display ops.

/// HD44780 opcodes and option bits.
pub mod commands;
/// Logical display operations.
pub mod display;
/// The 4-bit nibble protocol driver.
pub mod driver;
/// Display dimensions and DDRAM addressing.
pub mod geometry;
/// Signal-to-bit pin mapping.
pub mod pins;
