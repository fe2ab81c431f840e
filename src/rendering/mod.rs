use macroquad::prelude::*;

use crate::application::presentation::{frame_pixel, FrameSink};
use crate::application::Simulation;
use crate::domain::Geometry;

/// Screen pixels per panel pixel
pub const PIXEL_SCALE: f32 = 6.0;
/// Border around the panel
pub const MARGIN: f32 = 12.0;
/// Room below the panel for the status lines
pub const STATUS_HEIGHT: f32 = 70.0;

/// Window size needed to show a panel of the given extent
pub fn window_size(display: Geometry) -> (f32, f32) {
    let (w, h) = display.dimensions();
    (
        w as f32 * PIXEL_SCALE + 2.0 * MARGIN,
        h as f32 * PIXEL_SCALE + 2.0 * MARGIN + STATUS_HEIGHT,
    )
}

/// On-screen stand-in for the OLED panel.
/// Keeps the last flushed page buffer and draws it pixel by pixel.
pub struct OledWindow {
    display: Geometry,
    frame: Vec<u8>,
    pub lit: Color,
    pub unlit: Color,
}

impl OledWindow {
    pub fn new(display: Geometry) -> Self {
        Self {
            display,
            frame: vec![0; display.byte_len()],
            lit: Color::from_rgba(120, 200, 255, 255), // OLED blue
            unlit: Color::from_rgba(10, 12, 18, 255),
        }
    }

    /// Draw the panel as the controller would light it
    pub fn draw(&self) {
        let (w, h) = self.display.dimensions();
        draw_rectangle(
            MARGIN,
            MARGIN,
            w as f32 * PIXEL_SCALE,
            h as f32 * PIXEL_SCALE,
            self.unlit,
        );

        for y in 0..h {
            for x in 0..w {
                if frame_pixel(&self.frame, w, x, y) {
                    draw_rectangle(
                        MARGIN + x as f32 * PIXEL_SCALE,
                        MARGIN + y as f32 * PIXEL_SCALE,
                        PIXEL_SCALE,
                        PIXEL_SCALE,
                        self.lit,
                    );
                }
            }
        }

        draw_rectangle_lines(
            MARGIN - 2.0,
            MARGIN - 2.0,
            w as f32 * PIXEL_SCALE + 4.0,
            h as f32 * PIXEL_SCALE + 4.0,
            2.0,
            Color::from_rgba(40, 40, 40, 255),
        );
    }
}

impl FrameSink for OledWindow {
    fn flush(&mut self, frame: &[u8]) {
        if frame.len() == self.frame.len() {
            self.frame.copy_from_slice(frame);
        } else {
            self.frame.clear();
            self.frame.extend_from_slice(frame);
        }
    }
}

/// Helper to draw text labels
fn draw_text_label(text: &str, x: f32, y: f32, size: f32, color: Color) {
    draw_text(text, x, y, size, color);
}

/// Draw generation, population and controls below the panel
pub fn draw_status(state: &Simulation) {
    let top = screen_height() - STATUS_HEIGHT + 8.0;
    let (gw, gh) = state.logical_geometry().dimensions();

    let (generation, population, used) = match state.last_report {
        Some(report) => (report.generation, report.population, report.strategy.name()),
        None => (state.automaton.generation(), state.automaton.population(), "-"),
    };

    // Color code the step time
    let step_ms = state.last_step_time_ms;
    let perf_color = if step_ms < 1.0 {
        Color::from_rgba(0, 255, 0, 255)
    } else if step_ms < 16.0 {
        Color::from_rgba(255, 255, 0, 255)
    } else {
        Color::from_rgba(255, 0, 0, 255)
    };

    let tracked = state.automaton.active();
    let labels = [
        (
            format!(
                "{}  Gen {}  Pop {}  Tracked {}/{}  Grid {}x{}",
                state.preset.name(),
                generation,
                population,
                tracked.len(),
                tracked.capacity(),
                gw,
                gh
            ),
            MARGIN,
            top,
            18.0,
            WHITE,
        ),
        (
            format!(
                "{} ({}): {}  {:.2} ms/step  {:.0} gen/s  {}",
                state.strategy.name(),
                used,
                state.strategy.description(),
                step_ms,
                state.updates_per_second,
                if state.is_running { "Running" } else { "Paused" }
            ),
            MARGIN,
            top + 20.0,
            16.0,
            perf_color,
        ),
        (
            "1-6: Preset  Space: Play  N: Step  S: Strategy  R: New soup  Up/Down: Speed".to_owned(),
            MARGIN,
            top + 40.0,
            14.0,
            GRAY,
        ),
    ];

    labels.iter().for_each(|(text, x, y, size, color)| {
        draw_text_label(text, *x, *y, *size, *color);
    });
}
