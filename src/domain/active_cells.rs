//! Bounded, insertion-ordered list of live cells.
//!
//! Lets the sparse step visit only the neighborhood of live cells instead
//! of the whole grid. Capacity is fixed at compile time; once full, further
//! activations are dropped rather than growing the list, so dense late-stage
//! patterns can be truncated.

use heapless::Vec;

use super::bit_grid::PackedBitGrid;
use super::cell::Cell;
use super::geometry::{Geometry, NEIGHBOR_OFFSETS};

/// Default number of cells that can be tracked at once.
pub const MAX_ACTIVE_CELLS: usize = 512;

#[derive(Clone, Debug, Default)]
pub struct ActiveCellSet<const N: usize = MAX_ACTIVE_CELLS> {
    cells: Vec<Cell, N>,
}

impl<const N: usize> ActiveCellSet<N> {
    pub const fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Track `(x, y)` and mark it alive in `grid`.
    ///
    /// Returns `false` if the set is full: the cell is then neither tracked
    /// nor marked alive. A cell whose bit is already set is left as it is
    /// and reported as activated.
    pub fn activate(&mut self, grid: &mut PackedBitGrid, x: usize, y: usize) -> bool {
        let (x, y) = grid.geometry().wrap(x, y);
        if grid.get(x, y) {
            return true;
        }
        if self.cells.push(Cell::at(x, y)).is_err() {
            return false;
        }
        grid.set(x, y, true);
        true
    }

    /// Append without touching any grid. Caller guarantees uniqueness.
    pub(crate) fn track(&mut self, cell: Cell) -> bool {
        self.cells.push(cell).is_ok()
    }

    /// Empty the set. The grid is left untouched.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cells.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.cells.contains(&Cell::at(x, y))
    }

    /// Neighbor count of `(x, y)` taken over the tracked cells instead of the
    /// bit grid. Agrees with `PackedBitGrid::count_alive_neighbors` whenever
    /// tracking is exact.
    pub fn count_neighbors(&self, geometry: Geometry, x: usize, y: usize) -> u8 {
        let (x, y) = geometry.wrap(x, y);
        self.cells
            .iter()
            .map(|c| {
                NEIGHBOR_OFFSETS
                    .iter()
                    .filter(|&&(dx, dy)| geometry.offset(x, y, dx, dy) == c.coords())
                    .count() as u8
            })
            .sum()
    }
}

impl<'a, const N: usize> IntoIterator for &'a ActiveCellSet<N> {
    type Item = &'a Cell;
    type IntoIter = core::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(w: usize, h: usize) -> PackedBitGrid {
        PackedBitGrid::new(Geometry::new(w, h).unwrap())
    }

    #[test]
    fn test_activate_marks_grid() {
        let mut g = grid(16, 8);
        let mut set: ActiveCellSet<8> = ActiveCellSet::new();

        assert!(set.activate(&mut g, 3, 4));
        assert!(g.get(3, 4));
        assert_eq!(set.len(), 1);
        assert!(set.contains(3, 4));
    }

    #[test]
    fn test_activate_wraps() {
        let mut g = grid(16, 8);
        let mut set: ActiveCellSet<8> = ActiveCellSet::new();

        set.activate(&mut g, 17, 9);
        assert!(g.get(1, 1));
        assert_eq!(set.as_slice(), &[Cell::new(1, 1)]);
    }

    #[test]
    fn test_duplicate_activation_is_not_tracked_twice() {
        let mut g = grid(16, 8);
        let mut set: ActiveCellSet<8> = ActiveCellSet::new();

        set.activate(&mut g, 2, 2);
        assert!(set.activate(&mut g, 2, 2));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_full_set_drops_activation() {
        let mut g = grid(16, 8);
        let mut set: ActiveCellSet<3> = ActiveCellSet::new();

        for x in 0..3 {
            assert!(set.activate(&mut g, x, 0));
        }
        assert!(set.is_full());

        assert!(!set.activate(&mut g, 5, 5));
        assert!(!g.get(5, 5));
        assert_eq!(set.len(), 3);
        assert_eq!(g.population(), 3);
    }

    #[test]
    fn test_clear_leaves_grid() {
        let mut g = grid(16, 8);
        let mut set: ActiveCellSet<8> = ActiveCellSet::new();
        set.activate(&mut g, 1, 1);

        set.clear();
        assert!(set.is_empty());
        assert!(g.get(1, 1));
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let mut g = grid(16, 8);
        let mut set: ActiveCellSet<8> = ActiveCellSet::new();
        set.activate(&mut g, 9, 1);
        set.activate(&mut g, 0, 7);
        set.activate(&mut g, 4, 4);

        let first: std::vec::Vec<_> = set.iter().collect();
        let second: std::vec::Vec<_> = set.iter().collect();
        assert_eq!(first, vec![Cell::new(9, 1), Cell::new(0, 7), Cell::new(4, 4)]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_neighbor_count_matches_grid() {
        let mut g = grid(10, 8);
        let mut set: ActiveCellSet<16> = ActiveCellSet::new();
        for (x, y) in [(0, 0), (9, 7), (1, 0), (5, 5), (4, 4), (9, 0)] {
            set.activate(&mut g, x, y);
        }

        for y in 0..8 {
            for x in 0..10 {
                assert_eq!(
                    set.count_neighbors(g.geometry(), x, y),
                    g.count_alive_neighbors(x, y),
                    "Mismatch at ({}, {})", x, y
                );
            }
        }
    }

    #[test]
    fn test_default_capacity() {
        let set: ActiveCellSet = ActiveCellSet::new();
        assert_eq!(set.capacity(), MAX_ACTIVE_CELLS);
    }
}
