// src/io/i2c.rs

//! Linux i2c-dev transport.
//!
//! Opens `/dev/i2c-{bus}`, binds the 7-bit target address with the
//! `I2C_SLAVE` ioctl, and pushes raw bytes at the bound device. Requires the
//! `i2c-dev` kernel module.
//!
//! The LCD stack only ever writes, so [`I2cTransport`] exposes a write path
//! alone; [`LinuxI2cBus`] additionally provides a read for completeness.
//! Closing is the `OwnedFd` drop. Timeouts, if any, belong to the kernel
//! driver, not this layer.

use std::os::unix::io::{AsRawFd, OwnedFd, RawFd};

use crate::error::TransportError;

const I2C_SLAVE: nix::libc::c_ulong = 0x0703;

nix::ioctl_write_int_bad!(i2c_set_slave_addr, I2C_SLAVE);

/// Byte-oriented transport to the I/O expander.
///
/// The nibble driver is generic over this seam so tests can substitute a
/// recording transport for the physical bus.
pub trait I2cTransport: Send {
    /// Writes `buf` as one bus transaction, returning the byte count.
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, TransportError>;

    /// Writes a single expander frame.
    fn write_byte(&mut self, byte: u8) -> Result<(), TransportError> {
        self.write_bytes(&[byte]).map(|_| ())
    }
}

/// A connection to one device on a Linux i2c bus.
///
/// Exclusively owned by the display stack for the process lifetime; there is
/// no sharing across LCD instances.
#[derive(Debug)]
pub struct LinuxI2cBus {
    fd: OwnedFd,
    bus: u32,
    address: u16,
}

impl LinuxI2cBus {
    /// Opens `/dev/i2c-{bus}` and binds `address` as the transfer target.
    pub fn open(bus: u32, address: u16) -> Result<Self, TransportError> {
        let path = format!("/dev/i2c-{}", bus);
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .map_err(|source| TransportError::Open {
                path: path.clone(),
                source,
            })?;
        let fd = OwnedFd::from(file);

        unsafe { i2c_set_slave_addr(fd.as_raw_fd(), address as nix::libc::c_int) }
            .map_err(|source| TransportError::Bind { address, source })?;

        log::debug!(
            "Opened {} (fd {}) bound to address {:#04x}",
            path,
            fd.as_raw_fd(),
            address
        );
        Ok(Self { fd, bus, address })
    }

    pub fn bus(&self) -> u32 {
        self.bus
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    /// Reads up to `buf.len()` bytes from the bound device.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<usize, TransportError> {
        nix::unistd::read(&self.fd, buf).map_err(TransportError::Read)
    }
}

impl I2cTransport for LinuxI2cBus {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, TransportError> {
        log::trace!(
            "i2c write {:02x?} to {:#04x} on bus {}",
            buf,
            self.address,
            self.bus
        );
        nix::unistd::write(&self.fd, buf).map_err(TransportError::Write)
    }
}

impl AsRawFd for LinuxI2cBus {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}
