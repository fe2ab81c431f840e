//! Grid extents and toroidal coordinate wrapping.

use thiserror::Error;

/// Rows packed into one storage byte (one display page).
pub const PAGE_HEIGHT: usize = 8;

/// Smallest extent for which every Moore neighbor is a distinct cell.
pub const MIN_EXTENT: usize = 3;

/// Largest extent whose coordinates fit the 16-bit cell type.
pub const MAX_EXTENT: usize = u16::MAX as usize + 1;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("grid extent {width}x{height} is smaller than {min}x{min}", min = MIN_EXTENT)]
    TooSmall { width: usize, height: usize },

    #[error("grid height {0} is not a multiple of the {page}-row page height", page = PAGE_HEIGHT)]
    HeightNotPageAligned(usize),

    #[error("grid extent {width}x{height} is larger than {max}x{max}", max = MAX_EXTENT)]
    TooLarge { width: usize, height: usize },
}

/// Fixed W x H extent of a toroidal grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Geometry {
    width: usize,
    height: usize,
}

impl Geometry {
    pub fn new(width: usize, height: usize) -> Result<Self, GeometryError> {
        if width < MIN_EXTENT || height < MIN_EXTENT {
            return Err(GeometryError::TooSmall { width, height });
        }
        if width > MAX_EXTENT || height > MAX_EXTENT {
            return Err(GeometryError::TooLarge { width, height });
        }
        if height % PAGE_HEIGHT != 0 {
            return Err(GeometryError::HeightNotPageAligned(height));
        }
        Ok(Self { width, height })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Size of the packed page buffer, `W * H / 8`.
    pub const fn byte_len(&self) -> usize {
        self.width * (self.height / PAGE_HEIGHT)
    }

    /// Wrap arbitrary (possibly out-of-range) coordinates onto the torus.
    #[inline]
    pub const fn wrap(&self, x: usize, y: usize) -> (usize, usize) {
        (x % self.width, y % self.height)
    }

    /// Coordinates of `(x, y)` moved by `(dx, dy)`, wrapped toroidally.
    #[inline]
    pub fn offset(&self, x: usize, y: usize, dx: isize, dy: isize) -> (usize, usize) {
        let (x, y) = self.wrap(x, y);
        let w = self.width as isize;
        let h = self.height as isize;
        let nx = (x as isize + dx).rem_euclid(w);
        let ny = (y as isize + dy).rem_euclid(h);
        (nx as usize, ny as usize)
    }

    /// The 8 Moore neighbors of `(x, y)`, wrapped.
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dx, dy)| self.offset(x, y, dx, dy))
    }
}

/// All (dx, dy) in {-1, 0, 1}^2 except (0, 0).
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];
