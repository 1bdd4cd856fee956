// src/lcd/geometry.rs

//! Display dimensions and the non-linear DDRAM address layout.
//!
//! HD44780 DDRAM is not row-contiguous: row 1 starts at 0x00 and row 2 at
//! 0x40 regardless of width, while rows 3 and 4 continue row 1 and row 2's
//! address ranges. On a 4x16 module that yields offsets 0x00/0x40/0x10/0x50.
//! These are controller-family constants; a different controller needs its
//! own offset table.

use crate::error::ConfigError;

/// Row base offsets are `[0x00, 0x40, cols, 0x40 + cols]`; every addressable
/// cell must additionally fit the controller's 7-bit DDRAM space, which caps
/// four-row displays at 32 columns.
const MAX_ROWS: usize = 4;
const MAX_COLS: usize = 40;
const DDRAM_LAST: usize = 0x7F;

/// Visible dimensions of the display plus its DDRAM row offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayGeometry {
    rows: usize,
    cols: usize,
    row_offsets: [u8; MAX_ROWS],
}

impl DisplayGeometry {
    /// Builds the geometry and its per-row DDRAM offsets.
    pub fn new(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        if rows == 0 || rows > MAX_ROWS || cols == 0 || cols > MAX_COLS {
            return Err(ConfigError::Geometry { rows, cols });
        }
        let offsets = [0x00, 0x40, cols, 0x40 + cols];
        // The last cell of every used row must be DDRAM-addressable, or
        // SET_DDRAM_ADDR would alias the spilled bits into another row.
        if offsets[..rows].iter().any(|&o| o + cols - 1 > DDRAM_LAST) {
            return Err(ConfigError::Geometry { rows, cols });
        }
        let row_offsets = [0x00, 0x40, cols as u8, 0x40 + cols as u8];
        Ok(Self {
            rows,
            cols,
            row_offsets,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of visible cells.
    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }

    /// DDRAM address of `(row, col)`, both zero-based.
    pub fn ddram_address(&self, row: usize, col: usize) -> Result<u8, ConfigError> {
        if row >= self.rows || col >= self.cols {
            return Err(ConfigError::PositionOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.row_offsets[row] + col as u8)
    }

    /// Precomputed linear-index -> DDRAM address translation table, built
    /// once at construction time rather than hard-coded per display size.
    pub fn address_table(&self) -> Vec<u8> {
        let mut table = Vec::with_capacity(self.cells());
        for row in 0..self.rows {
            for col in 0..self.cols {
                table.push(self.row_offsets[row] + col as u8);
            }
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_by_sixteen_matches_the_classic_layout() {
        let geo = DisplayGeometry::new(4, 16).unwrap();
        assert_eq!(geo.ddram_address(0, 0).unwrap(), 0x00);
        assert_eq!(geo.ddram_address(1, 0).unwrap(), 0x40);
        assert_eq!(geo.ddram_address(2, 0).unwrap(), 0x10);
        assert_eq!(geo.ddram_address(3, 0).unwrap(), 0x50);
        assert_eq!(geo.ddram_address(3, 15).unwrap(), 0x5F);
    }

    #[test]
    fn four_by_twenty_shifts_the_lower_rows() {
        let geo = DisplayGeometry::new(4, 20).unwrap();
        assert_eq!(geo.ddram_address(2, 0).unwrap(), 0x14);
        assert_eq!(geo.ddram_address(3, 0).unwrap(), 0x54);
    }

    #[test]
    fn address_table_is_row_major_and_discontiguous() {
        let geo = DisplayGeometry::new(4, 16).unwrap();
        let table = geo.address_table();
        assert_eq!(table.len(), 64);
        assert_eq!(&table[0..4], &[0x00, 0x01, 0x02, 0x03]);
        assert_eq!(table[16], 0x40);
        assert_eq!(table[32], 0x10);
        assert_eq!(table[48], 0x50);
        assert_eq!(table[63], 0x5F);
    }

    #[test]
    fn out_of_range_position_is_an_error_not_address_zero() {
        let geo = DisplayGeometry::new(4, 16).unwrap();
        assert!(matches!(
            geo.ddram_address(4, 0),
            Err(ConfigError::PositionOutOfRange { row: 4, .. })
        ));
        assert!(matches!(
            geo.ddram_address(0, 16),
            Err(ConfigError::PositionOutOfRange { col: 16, .. })
        ));
    }

    #[test]
    fn rejects_dimensions_the_controller_cannot_address() {
        assert!(DisplayGeometry::new(0, 16).is_err());
        assert!(DisplayGeometry::new(5, 16).is_err());
        assert!(DisplayGeometry::new(4, 41).is_err());
    }

    #[test]
    fn rejects_geometries_that_spill_past_the_ddram_space() {
        // Four rows of 40 would put row 4's last cell at 0x8F, which the
        // 7-bit SET_DDRAM_ADDR payload cannot carry.
        assert!(matches!(
            DisplayGeometry::new(4, 40),
            Err(ConfigError::Geometry { rows: 4, cols: 40 })
        ));
        assert!(DisplayGeometry::new(4, 33).is_err());

        // 32 columns is the widest four-row layout that still fits.
        let geo = DisplayGeometry::new(4, 32).unwrap();
        assert_eq!(geo.ddram_address(3, 31).unwrap(), 0x7F);

        // Fewer rows leave the tall offsets unused, so 40 columns is fine.
        assert_eq!(
            DisplayGeometry::new(2, 40).unwrap().ddram_address(1, 39).unwrap(),
            0x67
        );
        assert!(DisplayGeometry::new(3, 40).is_ok());
    }
}
