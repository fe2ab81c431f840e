pub mod config;
pub mod mode;
pub mod presentation;
mod simulation;

pub use config::{Config, ConfigError};
pub use mode::ModeSwitch;
pub use presentation::{BlockScaler, FrameRecorder, FrameSink, Presenter};
pub use simulation::Simulation;
