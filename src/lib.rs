//! lcd-term library crate.
//!
//! Drives an HD44780-family character LCD behind an 8-bit I2C I/O expander
//! and layers a scrolling terminal emulator on top of it.

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod lcd;
pub mod term;
