//! Owned simulation state and the generation step.
//!
//! The current grid is never written while a generation is being computed.
//! The full scan writes into a second buffer and swaps; the sparse step
//! collects its result into a fresh active set and only touches the grid
//! after every candidate has been evaluated.

use std::iter;
use std::mem;

use super::active_cells::{ActiveCellSet, MAX_ACTIVE_CELLS};
use super::bit_grid::PackedBitGrid;
use super::cell::{Cell, CellState};
use super::geometry::Geometry;
use super::patterns::Canvas;
use super::strategy::Strategy;

/// Outcome of one generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// Generation number after the step
    pub generation: u64,
    /// Live cells on the grid after the step
    pub population: usize,
    /// Live cells the active set had no room for. After a sparse step these
    /// cells are dead; after a full scan they are alive but untracked.
    pub dropped: usize,
    /// Strategy that actually ran
    pub strategy: Strategy,
}

/// Grid, scratch buffer and active set of one simulation, allocated once.
#[derive(Clone, Debug)]
pub struct Automaton<const N: usize = MAX_ACTIVE_CELLS> {
    grid: PackedBitGrid,
    /// Next-state buffer for the full scan, visited marks for the sparse step
    scratch: PackedBitGrid,
    active: ActiveCellSet<N>,
    /// Every live bit is in `active`
    exact: bool,
    generation: u64,
}

impl<const N: usize> Automaton<N> {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            grid: PackedBitGrid::new(geometry),
            scratch: PackedBitGrid::new(geometry),
            active: ActiveCellSet::new(),
            exact: true,
            generation: 0,
        }
    }

    pub const fn geometry(&self) -> Geometry {
        self.grid.geometry()
    }

    pub fn grid(&self) -> &PackedBitGrid {
        &self.grid
    }

    pub fn active(&self) -> &ActiveCellSet<N> {
        &self.active
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.population()
    }

    /// Whether the active set holds every live cell
    pub const fn is_tracking_exact(&self) -> bool {
        self.exact
    }

    /// Packed page buffer of the current generation
    pub fn frame(&self) -> &[u8] {
        self.grid.as_bytes()
    }

    /// Activate one cell. Returns `false` when the active set is full and the
    /// cell was dropped.
    pub fn activate(&mut self, x: usize, y: usize) -> bool {
        self.active.activate(&mut self.grid, x, y)
    }

    /// Zero the grid, empty the active set and restart the generation count
    pub fn clear(&mut self) {
        self.grid.clear();
        self.active.clear();
        self.exact = true;
        self.generation = 0;
    }

    /// Advance one generation
    pub fn step(&mut self, strategy: Strategy) -> StepReport {
        let resolved = strategy.resolve(
            self.active.len(),
            self.geometry().cell_count(),
            self.exact,
        );

        let dropped = match resolved {
            Strategy::Sparse => self.step_sparse(),
            _ => self.step_full_scan(),
        };
        self.generation += 1;

        StepReport {
            generation: self.generation,
            population: self.grid.population(),
            dropped,
            strategy: resolved,
        }
    }

    fn step_full_scan(&mut self) -> usize {
        let (width, height) = self.grid.dimensions();
        self.scratch.clear();

        for y in 0..height {
            for x in 0..width {
                let current = CellState::from_alive(self.grid.get(x, y));
                let neighbors = self.grid.count_alive_neighbors(x, y);
                if current.evolve(neighbors).is_alive() {
                    self.scratch.set(x, y, true);
                }
            }
        }

        mem::swap(&mut self.grid, &mut self.scratch);
        self.retrack()
    }

    /// Rebuild the active set from the grid in row-major order
    fn retrack(&mut self) -> usize {
        self.active.clear();
        let mut dropped = 0;
        for (x, y) in self.grid.iter_alive() {
            if !self.active.track(Cell::at(x, y)) {
                dropped += 1;
            }
        }
        self.exact = dropped == 0;
        dropped
    }

    fn step_sparse(&mut self) -> usize {
        let geometry = self.geometry();
        let mut next = ActiveCellSet::<N>::new();
        let mut dropped = 0;

        // Scratch marks candidates already evaluated; rings overlap
        self.scratch.clear();

        for cell in &self.active {
            let (cx, cy) = cell.coords();
            for (x, y) in iter::once((cx, cy)).chain(geometry.neighbors(cx, cy)) {
                if self.scratch.get(x, y) {
                    continue;
                }
                self.scratch.set(x, y, true);

                let current = CellState::from_alive(self.grid.get(x, y));
                let neighbors = self.grid.count_alive_neighbors(x, y);
                if current.evolve(neighbors).is_alive() && !next.track(Cell::at(x, y)) {
                    dropped += 1;
                }
            }
        }

        for cell in &self.active {
            let (x, y) = cell.coords();
            self.grid.set(x, y, false);
        }
        for cell in &next {
            let (x, y) = cell.coords();
            self.grid.set(x, y, true);
        }
        self.active = next;

        dropped
    }
}

impl<const N: usize> Canvas for Automaton<N> {
    fn geometry(&self) -> Geometry {
        self.grid.geometry()
    }

    fn activate(&mut self, x: usize, y: usize) -> bool {
        Automaton::activate(self, x, y)
    }
}
