//! Hand-off of finished generations to the display.
//!
//! The transport only ever sees an opaque page buffer. With a block size of
//! 1 the grid's own bytes go out unmodified; otherwise every logical cell is
//! expanded into a square of pixels in a display-sized buffer with the same
//! packing.

use crate::domain::{Geometry, GeometryError, PackedBitGrid, PAGE_HEIGHT};

/// Receiver of packed frames. Synchronous, no response, no backpressure.
pub trait FrameSink {
    fn flush(&mut self, frame: &[u8]);
}

impl<S: FrameSink + ?Sized> FrameSink for &mut S {
    fn flush(&mut self, frame: &[u8]) {
        (**self).flush(frame);
    }
}

/// Sink that keeps every frame it receives
#[derive(Debug, Default)]
pub struct FrameRecorder {
    pub frames: Vec<Vec<u8>>,
}

impl FrameSink for FrameRecorder {
    fn flush(&mut self, frame: &[u8]) {
        self.frames.push(frame.to_vec());
    }
}

/// Read one pixel from a packed page buffer of the given width
#[inline]
pub fn frame_pixel(frame: &[u8], width: usize, x: usize, y: usize) -> bool {
    frame[(y / PAGE_HEIGHT) * width + x] & (1 << (y % PAGE_HEIGHT)) != 0
}

/// Expands logical cells into `block x block` pixel squares
#[derive(Clone, Debug)]
pub struct BlockScaler {
    block: usize,
    display: Geometry,
    buffer: Vec<u8>,
}

impl BlockScaler {
    pub fn new(logical: Geometry, block: usize) -> Result<Self, GeometryError> {
        let display = Geometry::new(logical.width() * block, logical.height() * block)?;
        Ok(Self {
            block,
            display,
            buffer: vec![0; display.byte_len()],
        })
    }

    pub const fn display(&self) -> Geometry {
        self.display
    }

    pub fn render(&mut self, grid: &PackedBitGrid) -> &[u8] {
        let width = self.display.width();
        let b = self.block;
        self.buffer.fill(0);

        for (cx, cy) in grid.iter_alive() {
            for py in cy * b..(cy + 1) * b {
                let row = (py / PAGE_HEIGHT) * width;
                let mask = 1u8 << (py % PAGE_HEIGHT);
                for px in cx * b..(cx + 1) * b {
                    self.buffer[row + px] |= mask;
                }
            }
        }

        &self.buffer
    }
}

/// Grid-to-transport adapter
#[derive(Clone, Debug)]
pub enum Presenter {
    /// Logical grid is the pixel grid
    Direct,
    Scaled(BlockScaler),
}

impl Presenter {
    pub fn new(logical: Geometry, block: usize) -> Result<Self, GeometryError> {
        if block == 1 {
            Ok(Presenter::Direct)
        } else {
            Ok(Presenter::Scaled(BlockScaler::new(logical, block)?))
        }
    }

    pub fn display(&self, logical: Geometry) -> Geometry {
        match self {
            Presenter::Direct => logical,
            Presenter::Scaled(scaler) => scaler.display(),
        }
    }

    pub fn present<S: FrameSink + ?Sized>(&mut self, grid: &PackedBitGrid, sink: &mut S) {
        match self {
            Presenter::Direct => sink.flush(grid.as_bytes()),
            Presenter::Scaled(scaler) => sink.flush(scaler.render(grid)),
        }
    }
}
