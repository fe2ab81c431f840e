// Domain layer - grid, active set, engine, patterns
pub mod domain;

// Application layer - simulation loop, mode flag, presentation
pub mod application;

// Infrastructure layer - window rendering, keyboard input
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{
    ActiveCellSet, Automaton, Cell, PackedBitGrid, Preset, Shape, StepReport, Strategy,
    MAX_ACTIVE_CELLS,
};
pub use application::{Config, ConfigError, FrameSink, ModeSwitch, Simulation};
