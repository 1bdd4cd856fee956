// src/main.rs

//! Entry point for the `lcd-term` binary: run a command and mirror its
//! output onto an I2C character LCD.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use lcd_term::cli::Cli;
use lcd_term::config::Config;
use lcd_term::io::child::{run_piped, ChildConfig};
use lcd_term::io::i2c::LinuxI2cBus;
use lcd_term::lcd::display::LcdDisplay;
use lcd_term::term::writer::TerminalWriter;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(bus) = cli.bus {
        config.bus.number = bus;
    }
    if let Some(address) = cli.address {
        config.bus.address = address;
    }

    let pins = config.display.pins.pin_map()?;
    let geometry = config.display.geometry()?;
    info!(
        "Using /dev/i2c-{} at {:#04x}, {}x{} display",
        config.bus.number,
        config.bus.address,
        geometry.rows(),
        geometry.cols()
    );

    let bus = LinuxI2cBus::open(config.bus.number, config.bus.address)
        .context("failed to open the i2c bus")?;
    let mut display = LcdDisplay::new(bus, pins, geometry)
        .context("failed to initialize the display")?;
    if cli.backlight_off {
        display.backlight_off()?;
    } else {
        display.backlight_on()?;
    }

    let writer = TerminalWriter::new(display, config.terminal.tab_width)?;
    let writer = Arc::new(Mutex::new(writer));

    let (command, args) = cli
        .command
        .split_first()
        .context("command missing")?;
    let child_config = ChildConfig {
        command,
        args,
        mirror_stderr: !cli.no_stderr,
    };
    let status = run_piped(&child_config, writer)?;

    match status.code() {
        Some(0) => Ok(()),
        Some(code) => std::process::exit(code),
        None => {
            warn!("child '{}' was terminated by a signal", command);
            std::process::exit(1);
        }
    }
}
