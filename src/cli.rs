// src/cli.rs

//! Command-line surface of the `lcd-term` binary.

use std::path::PathBuf;

use clap::Parser;

/// Run a command and mirror its output onto an I2C character LCD.
#[derive(Parser, Debug)]
#[command(version, about, arg_required_else_help = true)]
pub struct Cli {
    /// i2c bus number (the N in /dev/i2c-N); overrides the config file.
    #[arg(short, long)]
    pub bus: Option<u32>,

    /// 7-bit device address of the expander (decimal or 0x-prefixed hex).
    #[arg(short, long, value_parser = parse_address)]
    pub address: Option<u16>,

    /// Path to a JSON config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Do not mirror the child's stderr onto the display.
    #[arg(long)]
    pub no_stderr: bool,

    /// Leave the backlight off.
    #[arg(long)]
    pub backlight_off: bool,

    /// The command to run, followed by its arguments.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

fn parse_address(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    let address = parsed.map_err(|e| format!("invalid address '{}': {}", s, e))?;
    if address > 0x7F {
        return Err(format!("address {:#04x} is not a 7-bit i2c address", address));
    }
    Ok(address)
}
