// src/term/writer.rs

//! A typewriter abstraction over the display's discontiguous address space.
//!
//! Maintains a rows x cols byte grid in row-major order with a linear cursor,
//! translates linear positions to DDRAM addresses through a table precomputed
//! from the geometry, and scrolls the grid up in place when the cursor runs
//! past the end. Printable bytes are echoed to the display immediately, one
//! address-set plus one character write each; after a scroll the whole
//! visible buffer is re-sent rather than patched incrementally, trading bus
//! traffic for not having to re-derive which physical addresses moved.
//!
//! The grid is allocated once and never reallocated; scrolling shifts rows
//! within it.

use log::trace;

use crate::error::{ConfigError, LcdError};
use crate::io::i2c::I2cTransport;
use crate::lcd::display::LcdDisplay;

const SPACE: u8 = b' ';

/// Scrolling terminal over an [`LcdDisplay`].
#[derive(Debug)]
pub struct TerminalWriter<B: I2cTransport> {
    display: LcdDisplay<B>,
    /// Row-major cell grid, space-filled.
    cells: Vec<u8>,
    /// Linear index -> DDRAM address, one entry per cell.
    addresses: Vec<u8>,
    /// Linear cursor in `[0, cells.len()]`; sitting exactly at the end means
    /// a scroll is pending for the next glyph.
    cursor: usize,
    cols: usize,
    tab_width: usize,
}

impl<B: I2cTransport> TerminalWriter<B> {
    /// Wraps `display`, clearing it so grid and glass start in sync.
    pub fn new(mut display: LcdDisplay<B>, tab_width: usize) -> Result<Self, LcdError> {
        if tab_width == 0 {
            return Err(ConfigError::ZeroTabWidth.into());
        }
        display.clear()?;
        let geometry = display.geometry();
        Ok(Self {
            addresses: geometry.address_table(),
            cells: vec![SPACE; geometry.cells()],
            cursor: 0,
            cols: geometry.cols(),
            tab_width,
            display,
        })
    }

    /// Current linear cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The grid contents of visual row `row`, or `None` past the bottom row.
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        self.cells.chunks(self.cols).nth(row)
    }

    /// Feeds a run of bytes through the typewriter rules.
    ///
    /// `\r` is absorbed; `\t` advances the cursor to the next multiple of the
    /// tab width; `\n` to the next multiple of the row width; anything else
    /// is stored, echoed to the display immediately, and advances the cursor
    /// by one. The scroll check runs after every byte. Callers sharing the
    /// writer across threads hold its lock for the whole call, so a multi-
    /// byte write (including any scroll-and-redraw) reaches the display
    /// without interleaving.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), LcdError> {
        for &byte in bytes {
            match byte {
                b'\r' => continue,
                b'\t' => {
                    self.cursor += self.tab_width;
                    self.cursor -= self.cursor % self.tab_width;
                }
                b'\n' => {
                    self.cursor += self.cols;
                    self.cursor -= self.cursor % self.cols;
                }
                _ => {
                    // A byte that needs a cell reclaims one first, so filling
                    // the grid exactly leaves it intact until the next glyph.
                    self.scroll_until(|cursor, capacity| cursor < capacity)?;
                    let address = self.addresses[self.cursor];
                    self.cells[self.cursor] = byte;
                    self.display.set_ddram_address(address)?;
                    self.display.write_char(byte)?;
                    self.cursor += 1;
                }
            }
            // Post-byte check: a cursor parked exactly at the capacity
            // boundary is the "scroll pending" state; only a cursor strictly
            // past it scrolls now.
            self.scroll_until(|cursor, capacity| cursor <= capacity)?;
        }
        Ok(())
    }

    /// Scrolls until `in_bounds(cursor, capacity)` holds: each step shifts
    /// every row up by one, blank-fills the bottom row, and retreats the
    /// cursor by exactly one row width. Any scrolling ends in a full redraw.
    fn scroll_until(
        &mut self,
        in_bounds: fn(usize, usize) -> bool,
    ) -> Result<(), LcdError> {
        let mut scrolled = false;
        while !in_bounds(self.cursor, self.cells.len()) {
            self.cells.copy_within(self.cols.., 0);
            let bottom = self.cells.len() - self.cols;
            self.cells[bottom..].fill(SPACE);
            self.cursor -= self.cols;
            scrolled = true;
            trace!("scrolled one row, cursor now {}", self.cursor);
        }
        if scrolled {
            self.redraw()?;
        }
        Ok(())
    }

    /// Re-sends the entire grid, one address-set per row, letting the
    /// controller auto-increment across each row's contiguous addresses.
    fn redraw(&mut self) -> Result<(), LcdError> {
        let Self {
            display,
            cells,
            addresses,
            cols,
            ..
        } = self;
        for (row, line) in cells.chunks(*cols).enumerate() {
            display.set_ddram_address(addresses[row * *cols])?;
            display.write_bytes(line)?;
        }
        Ok(())
    }
}

/// The writer is a plain byte sink to the host side; stream plumbing needs no
/// knowledge of the LCD protocol.
impl<B: I2cTransport> std::io::Write for TerminalWriter<B> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
