// src/io/mock.rs

//! Recording transport for tests.
//!
//! Captures every frame the driver would put on the wire so tests can assert
//! on strobe sequences without hardware attached. Handles are cheap clones
//! over shared state: one clone goes into the driver, the test keeps another
//! to read the recording back out. A scripted failure point exercises the
//! no-partial-nibble error path.

use std::sync::{Arc, Mutex};

use crate::error::TransportError;
use crate::io::i2c::I2cTransport;

#[derive(Debug, Default)]
struct Recording {
    frames: Vec<u8>,
    written: usize,
}

/// In-memory stand-in for the i2c bus.
#[derive(Debug, Clone, Default)]
pub struct MockBus {
    recording: Arc<Mutex<Recording>>,
    /// When set, the write that would record frame number `n` (0-based,
    /// counted over the whole session) fails instead.
    fail_at: Option<usize>,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bus whose `n`-th single-byte write reports a transport failure.
    pub fn failing_at(n: usize) -> Self {
        Self {
            fail_at: Some(n),
            ..Self::default()
        }
    }

    /// All frames written so far, in order.
    pub fn frames(&self) -> Vec<u8> {
        self.recording.lock().unwrap().frames.clone()
    }

    /// Drains and returns the recorded frames, so a test can discard the
    /// init sequence and assert on what follows.
    pub fn take_frames(&self) -> Vec<u8> {
        std::mem::take(&mut self.recording.lock().unwrap().frames)
    }
}

impl I2cTransport for MockBus {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<usize, TransportError> {
        let mut recording = self.recording.lock().unwrap();
        for &byte in buf {
            if self.fail_at == Some(recording.written) {
                return Err(TransportError::Write(nix::Error::EIO));
            }
            recording.frames.push(byte);
            recording.written += 1;
        }
        Ok(buf.len())
    }
}
