// src/config.rs

//! Configuration for the bus, the wiring, and the terminal.
//!
//! Deserialized from an optional JSON file; every section carries defaults
//! matching the common PCF8574 backpack on bus 1 at 0x27, wired
//! en=2 rw=1 rs=0 d4..d7=4..7 backlight=3, driving a 4x16 module.
//! The pin map and geometry are validated when converted into their typed
//! forms, not at deserialization time.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::lcd::geometry::DisplayGeometry;
use crate::lcd::pins::PinMap;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Which bus and device to talk to.
    pub bus: BusConfig,
    /// Display dimensions and wiring.
    pub display: DisplayConfig,
    /// Terminal behavior.
    pub terminal: TerminalConfig,
}

impl Config {
    /// Loads configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

/// The i2c bus and target address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BusConfig {
    /// The N in `/dev/i2c-N`.
    pub number: u32,
    /// 7-bit device address of the I/O expander.
    pub address: u16,
}

impl Default for BusConfig {
    fn default() -> Self {
        BusConfig {
            number: 1,
            address: 0x27,
        }
    }
}

/// Display dimensions and signal wiring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Visible rows.
    pub rows: usize,
    /// Visible columns.
    pub cols: usize,
    /// Signal-to-bit wiring of the expander.
    pub pins: PinConfig,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            rows: 4,
            cols: 16,
            pins: PinConfig::default(),
        }
    }
}

impl DisplayConfig {
    /// Validated geometry for these dimensions.
    pub fn geometry(&self) -> Result<DisplayGeometry, ConfigError> {
        DisplayGeometry::new(self.rows, self.cols)
    }
}

/// Bit positions of the logical signals on the expander byte.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PinConfig {
    pub enable: u8,
    pub read_write: u8,
    pub register_select: u8,
    pub data4: u8,
    pub data5: u8,
    pub data6: u8,
    pub data7: u8,
    pub backlight: u8,
}

impl Default for PinConfig {
    fn default() -> Self {
        PinConfig {
            enable: 2,
            read_write: 1,
            register_select: 0,
            data4: 4,
            data5: 5,
            data6: 6,
            data7: 7,
            backlight: 3,
        }
    }
}

impl PinConfig {
    /// Validated pin map; rejects overlapping or out-of-range bits.
    pub fn pin_map(&self) -> Result<PinMap, ConfigError> {
        PinMap::new(
            self.enable,
            self.read_write,
            self.register_select,
            self.data4,
            self.data5,
            self.data6,
            self.data7,
            self.backlight,
        )
    }
}

/// Terminal behavior knobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TerminalConfig {
    /// Tab stops every this many cells.
    pub tab_width: usize,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        TerminalConfig { tab_width: 4 }
    }
}
