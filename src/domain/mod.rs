mod cell;
mod geometry;
mod bit_grid;
mod active_cells;
mod strategy;
mod automaton;
mod patterns;

pub use cell::{Cell, CellState};
pub use geometry::{Geometry, GeometryError, MAX_EXTENT, NEIGHBOR_OFFSETS, PAGE_HEIGHT};
pub use bit_grid::PackedBitGrid;
pub use active_cells::{ActiveCellSet, MAX_ACTIVE_CELLS};
pub use strategy::Strategy;
pub use automaton::{Automaton, StepReport};
pub use patterns::{Canvas, Preset, Shape, DEFAULT_SOUP_SEED};
