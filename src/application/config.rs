//! Startup configuration: display extent, cell block size, pacing, and
//! the initial preset and strategy.

use thiserror::Error;

use crate::domain::{Geometry, GeometryError, Preset, Strategy};

/// Panel width in pixels
pub const DISPLAY_WIDTH: usize = 128;
/// Panel height in pixels
pub const DISPLAY_HEIGHT: usize = 64;
/// Pixels per logical cell edge
pub const DEFAULT_BLOCK_SIZE: usize = 4;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("block size must be at least 1")]
    ZeroBlockSize,

    #[error("display {width}x{height} is not divisible into {block}x{block} blocks")]
    DisplayNotDivisible {
        width: usize,
        height: usize,
        block: usize,
    },

    #[error("update rate {0} is not a positive number of generations per second")]
    InvalidRate(f32),

    #[error("invalid grid geometry: {0}")]
    Geometry(#[from] GeometryError),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub display_width: usize,
    pub display_height: usize,
    pub block_size: usize,
    pub updates_per_second: f32,
    pub strategy: Strategy,
    pub preset: Preset,
    pub start_paused: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display_width: DISPLAY_WIDTH,
            display_height: DISPLAY_HEIGHT,
            block_size: DEFAULT_BLOCK_SIZE,
            updates_per_second: 10.0,
            strategy: Strategy::default(),
            preset: Preset::GliderField,
            start_paused: false,
        }
    }
}

impl Config {
    pub fn display_geometry(&self) -> Result<Geometry, ConfigError> {
        Ok(Geometry::new(self.display_width, self.display_height)?)
    }

    /// Grid the automaton runs on: the display divided into blocks
    pub fn logical_geometry(&self) -> Result<Geometry, ConfigError> {
        let block = self.block_size;
        if block == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.display_width % block != 0 || self.display_height % block != 0 {
            return Err(ConfigError::DisplayNotDivisible {
                width: self.display_width,
                height: self.display_height,
                block,
            });
        }
        Ok(Geometry::new(self.display_width / block, self.display_height / block)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.display_geometry()?;
        self.logical_geometry()?;
        if !(self.updates_per_second.is_finite() && self.updates_per_second > 0.0) {
            return Err(ConfigError::InvalidRate(self.updates_per_second));
        }
        Ok(())
    }
}
