//! Strategy enum for selecting how a generation is computed.
//!
//! Both concrete strategies produce bit-identical grids; they differ only in
//! which cells are evaluated.

/// Available step strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Evaluate every cell into a second buffer, then swap
    FullScan,
    /// Evaluate only tracked cells and their Moore rings
    Sparse,
    /// Sparse while the population is small and fully tracked, full scan otherwise
    #[default]
    Adaptive,
}

impl Strategy {
    /// Get all available strategies
    pub fn all() -> [Strategy; 3] {
        [Strategy::FullScan, Strategy::Sparse, Strategy::Adaptive]
    }

    /// Display name for the status line
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::FullScan => "FullScan",
            Strategy::Sparse => "Sparse",
            Strategy::Adaptive => "Adaptive",
        }
    }

    /// Short description, shown next to the name in the status line
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::FullScan => "every cell, double-buffered",
            Strategy::Sparse => "live cells and their neighbors only",
            Strategy::Adaptive => "sparse when population is low",
        }
    }

    /// The strategy after this one, for cycling from the keyboard
    pub fn next(self) -> Self {
        match self {
            Strategy::FullScan => Strategy::Sparse,
            Strategy::Sparse => Strategy::Adaptive,
            Strategy::Adaptive => Strategy::FullScan,
        }
    }

    /// Resolve to a concrete strategy for one step.
    ///
    /// Sparse needs every live cell to be tracked; if some are not, the step
    /// has to scan the full grid.
    pub fn resolve(self, population: usize, cell_count: usize, exact: bool) -> Strategy {
        match self {
            Strategy::FullScan => Strategy::FullScan,
            Strategy::Sparse if exact => Strategy::Sparse,
            Strategy::Sparse => Strategy::FullScan,
            // Each live cell contributes at most itself plus 8 neighbors
            Strategy::Adaptive if exact && population.saturating_mul(9) < cell_count => {
                Strategy::Sparse
            }
            Strategy::Adaptive => Strategy::FullScan,
        }
    }
}
