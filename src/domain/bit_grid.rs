//! Bit-packed toroidal grid laid out the way page-addressed OLED
//! controllers expect their frame: each byte is a vertical strip of 8
//! rows in one column, so the raw buffer can be streamed as-is.
//!
//! Byte index is `(y / 8) * W + x`, bit index `y % 8` (LSB is the top row
//! of the page).

use super::geometry::{Geometry, PAGE_HEIGHT};

/// Bit-packed grid storing cells as individual bits
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedBitGrid {
    geometry: Geometry,
    /// `W * H / 8` bytes, page-major
    bytes: Vec<u8>,
}

impl PackedBitGrid {
    /// Create new empty bit grid
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            bytes: vec![0; geometry.byte_len()],
        }
    }

    pub const fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        self.geometry.dimensions()
    }

    /// Byte index and bit mask of already-wrapped coordinates
    #[inline]
    fn locate(&self, x: usize, y: usize) -> (usize, u8) {
        let idx = (y / PAGE_HEIGHT) * self.geometry.width() + x;
        (idx, 1u8 << (y % PAGE_HEIGHT))
    }

    /// Cell state at (x mod W, y mod H)
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        let (x, y) = self.geometry.wrap(x, y);
        let (idx, mask) = self.locate(x, y);
        self.bytes[idx] & mask != 0
    }

    /// Set cell state at (x mod W, y mod H)
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        let (x, y) = self.geometry.wrap(x, y);
        let (idx, mask) = self.locate(x, y);
        if alive {
            self.bytes[idx] |= mask;
        } else {
            self.bytes[idx] &= !mask;
        }
    }

    /// Count live cells among the 8 Moore neighbors, wrapping at every edge
    pub fn count_alive_neighbors(&self, x: usize, y: usize) -> u8 {
        self.geometry
            .neighbors(x, y)
            .filter(|&(nx, ny)| self.get(nx, ny))
            .count() as u8
    }

    /// Count total alive cells
    pub fn population(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Clear all cells
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Raw page buffer, ready for the display transport
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Alive cells in row-major order (y, then x)
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (w, h) = self.dimensions();
        (0..h)
            .flat_map(move |y| (0..w).map(move |x| (x, y)))
            .filter(|&(x, y)| self.get(x, y))
    }
}
