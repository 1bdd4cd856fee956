// src/error.rs

//! Error taxonomy for the LCD stack.
//!
//! Every failure surfaces synchronously to the immediate caller; nothing in
//! this crate retries a bus transaction, since a half-sent nibble pulse
//! cannot be safely resumed.

use thiserror::Error;

/// Failures at the i2c-dev transport layer.
///
/// A transport error is fatal to the operation that triggered it. The enable
/// pulse in particular must complete or fail as a unit, so callers never see
/// a partially-sent nibble reported as success.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Opening the bus character device failed.
    #[error("failed to open i2c bus device {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Binding the 7-bit target address with `I2C_SLAVE` failed.
    #[error("failed to bind i2c address {address:#04x}: {source}")]
    Bind {
        address: u16,
        #[source]
        source: nix::Error,
    },

    /// A byte write to the bound device failed.
    #[error("i2c bus write failed: {0}")]
    Write(#[source] nix::Error),

    /// A byte read from the bound device failed.
    #[error("i2c bus read failed: {0}")]
    Read(#[source] nix::Error),
}

/// Invalid construction parameters or call arguments.
///
/// Rejected up front rather than silently producing garbled output on the
/// display.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A pin map entry names a bit outside the expander's 8-bit frame.
    #[error("pin {name} is bit {bit}, outside the expander range 0-7")]
    PinOutOfRange { name: &'static str, bit: u8 },

    /// Two pin map entries share a bit.
    #[error("pins {first} and {second} both map to bit {bit}")]
    PinConflict {
        first: &'static str,
        second: &'static str,
        bit: u8,
    },

    /// Display dimensions the controller family cannot address.
    #[error("unsupported display geometry {rows}x{cols}")]
    Geometry { rows: usize, cols: usize },

    /// A cursor position outside the visible grid.
    #[error("position ({row}, {col}) is outside the {rows}x{cols} display")]
    PositionOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Tab width must be nonzero to make "next multiple" meaningful.
    #[error("tab width must be at least 1")]
    ZeroTabWidth,
}

/// Top-level error for display operations.
#[derive(Debug, Error)]
pub enum LcdError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A transport failure during the mandated power-on sequence. No
    /// partially-initialized driver is ever returned.
    #[error("controller initialization failed: {0}")]
    Init(#[source] TransportError),
}

impl From<LcdError> for std::io::Error {
    fn from(err: LcdError) -> Self {
        match err {
            LcdError::Config(_) => std::io::Error::new(std::io::ErrorKind::InvalidInput, err),
            _ => std::io::Error::other(err),
        }
    }
}
