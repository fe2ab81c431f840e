/// Cell is a coordinate on the logical grid.
/// It has no identity beyond the collection that holds it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

impl Cell {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Build from already-wrapped grid coordinates; `Geometry` bounds both
    /// extents to `MAX_EXTENT`, so they fit in 16 bits
    pub const fn at(x: usize, y: usize) -> Self {
        Self { x: x as u16, y: y as u16 }
    }

    pub const fn coords(self) -> (usize, usize) {
        (self.x as usize, self.y as usize)
    }
}

/// CellState is the state of one cell: Dead or Alive.
/// Carries the fixed B3/S23 rule.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellState {
    Dead,
    Alive,
}

impl CellState {
    pub const fn from_alive(alive: bool) -> Self {
        if alive { CellState::Alive } else { CellState::Dead }
    }

    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        matches!(self, CellState::Alive)
    }

    /// Next state from the live neighbor count:
    /// 1. Live cell with 2-3 neighbors survives
    /// 2. Dead cell with exactly 3 neighbors becomes alive
    /// 3. All other cases result in death
    pub const fn evolve(self, neighbors: u8) -> Self {
        match (self, neighbors) {
            (CellState::Alive, 2 | 3) => CellState::Alive,
            (CellState::Dead, 3) => CellState::Alive,
            _ => CellState::Dead,
        }
    }
}
