use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::geometry::Geometry;

/// Anything patterns can be stamped onto.
///
/// The engine implements this, but any caller that can activate cells can
/// seed itself from the library.
pub trait Canvas {
    fn geometry(&self) -> Geometry;

    /// Activate one cell; `false` means the activation was dropped
    fn activate(&mut self, x: usize, y: usize) -> bool;
}

/// Stamp relative offsets at an anchor. Returns the number of dropped cells.
fn stamp_cells<C, I>(canvas: &mut C, x0: usize, y0: usize, cells: I) -> usize
where
    C: Canvas + ?Sized,
    I: IntoIterator<Item = (usize, usize)>,
{
    let (x0, y0) = canvas.geometry().wrap(x0, y0);
    cells
        .into_iter()
        .filter(|&(dx, dy)| !canvas.activate(x0 + dx, y0 + dy))
        .count()
}

/// Shapes that can be placed at an anchor (top-left corner)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Column of `length` cells
    VerticalLine { length: usize },
    /// Smallest spaceship, moves (+1, +1) every 4 generations
    Glider,
    /// Lightweight spaceship, moves horizontally (period 4)
    Lwss,
    /// Period 3 oscillator
    Pulsar,
    /// 2x2 still life
    Block,
}

const GLIDER: [(usize, usize); 5] = [
    (1, 0),
    (2, 1),
    (0, 2), (1, 2), (2, 2),
];

/// ```text
/// #..#.
/// ....#
/// #...#
/// .####
/// ```
const LWSS: [(usize, usize); 9] = [
    (0, 0), (3, 0),
    (4, 1),
    (0, 2), (4, 2),
    (1, 3), (2, 3), (3, 3), (4, 3),
];

const BLOCK: [(usize, usize); 4] = [
    (0, 0), (1, 0),
    (0, 1), (1, 1),
];

/// `..###...###..`
const PULSAR_DOUBLE_TRIPLE: [usize; 6] = [2, 3, 4, 8, 9, 10];

/// `#....#.#....#`
const PULSAR_QUADRUPLE_SINGLE: [usize; 4] = [0, 5, 7, 12];

/// Pulsar rows, top to bottom: which sub-shape sits on each row
const PULSAR_ROWS: [(usize, &[usize]); 10] = [
    (0, &PULSAR_DOUBLE_TRIPLE),
    (2, &PULSAR_QUADRUPLE_SINGLE),
    (3, &PULSAR_QUADRUPLE_SINGLE),
    (4, &PULSAR_QUADRUPLE_SINGLE),
    (5, &PULSAR_DOUBLE_TRIPLE),
    (7, &PULSAR_DOUBLE_TRIPLE),
    (8, &PULSAR_QUADRUPLE_SINGLE),
    (9, &PULSAR_QUADRUPLE_SINGLE),
    (10, &PULSAR_QUADRUPLE_SINGLE),
    (12, &PULSAR_DOUBLE_TRIPLE),
];

impl Shape {
    /// Relative coordinates of the alive cells
    pub fn cells(&self) -> Vec<(usize, usize)> {
        match *self {
            Shape::VerticalLine { length } => (0..length).map(|dy| (0, dy)).collect(),
            Shape::Glider => GLIDER.to_vec(),
            Shape::Lwss => LWSS.to_vec(),
            Shape::Block => BLOCK.to_vec(),
            Shape::Pulsar => PULSAR_ROWS
                .iter()
                .flat_map(|&(dy, columns)| columns.iter().map(move |&dx| (dx, dy)))
                .collect(),
        }
    }

    /// Place the shape with its top-left corner at `(x0, y0)`.
    /// Returns how many cells were dropped by a full active set.
    pub fn stamp<C: Canvas + ?Sized>(&self, canvas: &mut C, x0: usize, y0: usize) -> usize {
        stamp_cells(canvas, x0, y0, self.cells())
    }
}

/// Seed used by `Preset::Soup` when none is given
pub const DEFAULT_SOUP_SEED: u64 = 0x5EED;

/// Whole-grid seed scenes, selected by index
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Two vertical lines at a quarter and three quarters of the width
    VerticalLines,
    /// 6 x 3 array of gliders spread over the grid
    GliderField,
    /// Four lightweight spaceships, one per quadrant
    SpaceshipFleet,
    /// One pulsar
    Pulsar,
    /// Two pulsars side by side
    TwinPulsars,
    /// Reproducible random fill, ~25% alive
    Soup { seed: u64 },
}

const GLIDER_SIZE: usize = 3;
const GLIDERS_PER_ROW: usize = 6;
const GLIDERS_PER_COLUMN: usize = 3;

impl Preset {
    pub const COUNT: usize = 6;

    /// Get all available presets
    pub fn all() -> [Preset; Self::COUNT] {
        [
            Preset::VerticalLines,
            Preset::GliderField,
            Preset::SpaceshipFleet,
            Preset::Pulsar,
            Preset::TwinPulsars,
            Preset::Soup { seed: DEFAULT_SOUP_SEED },
        ]
    }

    /// Map a selector index onto a preset, wrapping past the end
    pub fn from_index(index: usize) -> Self {
        Self::all()[index % Self::COUNT]
    }

    pub fn index(&self) -> usize {
        match self {
            Preset::VerticalLines => 0,
            Preset::GliderField => 1,
            Preset::SpaceshipFleet => 2,
            Preset::Pulsar => 3,
            Preset::TwinPulsars => 4,
            Preset::Soup { .. } => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::VerticalLines => "Lines",
            Preset::GliderField => "Gliders",
            Preset::SpaceshipFleet => "Spaceships",
            Preset::Pulsar => "Pulsar",
            Preset::TwinPulsars => "2 Pulsars",
            Preset::Soup { .. } => "Soup",
        }
    }

    /// Replace the soup seed; other presets are unaffected
    pub fn with_seed(self, seed: u64) -> Self {
        match self {
            Preset::Soup { .. } => Preset::Soup { seed },
            other => other,
        }
    }

    /// Stamp the scene. Returns how many cells were dropped.
    pub fn stamp<C: Canvas + ?Sized>(&self, canvas: &mut C) -> usize {
        let geometry = canvas.geometry();
        let (w, h) = geometry.dimensions();

        match *self {
            Preset::VerticalLines => {
                let line = Shape::VerticalLine { length: h - 4 };
                line.stamp(canvas, w / 4, 2) + line.stamp(canvas, 3 * w / 4, 2)
            }
            Preset::GliderField => {
                let dx = ((w - GLIDER_SIZE) / (GLIDERS_PER_ROW - 1)).max(1);
                let dy = ((h - GLIDER_SIZE) / (GLIDERS_PER_COLUMN - 1)).max(1);
                let start = GLIDER_SIZE / 2;

                let mut dropped = 0;
                for x in (start..w - start).step_by(dx) {
                    for y in (start..h - start).step_by(dy) {
                        dropped += Shape::Glider.stamp(canvas, x, y);
                    }
                }
                dropped
            }
            Preset::SpaceshipFleet => {
                let (w, h) = (w as isize, h as isize);
                let columns = [w / 4 - 4, 3 * w / 4 - 2];
                let rows = [h / 4 - 4, 3 * h / 4 - 2];

                let mut dropped = 0;
                for &x in &columns {
                    for &y in &rows {
                        let (x0, y0) = geometry.offset(0, 0, x, y);
                        dropped += Shape::Lwss.stamp(canvas, x0, y0);
                    }
                }
                dropped
            }
            Preset::Pulsar => Shape::Pulsar.stamp(canvas, w / 4 + 2, 2),
            Preset::TwinPulsars => {
                Shape::Pulsar.stamp(canvas, 2, 2) + Shape::Pulsar.stamp(canvas, w / 2 + 2, 2)
            }
            Preset::Soup { seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut cells = Vec::new();
                for y in 0..h {
                    // Two random words ANDed: ~25% of bits set
                    let mut bits = 0u64;
                    for x in 0..w {
                        if x % 64 == 0 {
                            bits = rng.random::<u64>() & rng.random::<u64>();
                        }
                        if (bits >> (x % 64)) & 1 == 1 {
                            cells.push((x, y));
                        }
                    }
                }
                stamp_cells(canvas, 0, 0, cells)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Automaton, Strategy};

    fn automaton() -> Automaton {
        Automaton::new(Geometry::new(32, 16).unwrap())
    }

    #[test]
    fn test_shape_cell_counts() {
        assert_eq!(Shape::Glider.cells().len(), 5);
        assert_eq!(Shape::Lwss.cells().len(), 9);
        assert_eq!(Shape::Pulsar.cells().len(), 48);
        assert_eq!(Shape::Block.cells().len(), 4);
        assert_eq!(Shape::VerticalLine { length: 7 }.cells().len(), 7);
    }

    #[test]
    fn test_stamp_wraps_huge_anchor() {
        let mut a = automaton();
        assert_eq!(Shape::Glider.stamp(&mut a, usize::MAX, usize::MAX), 0);

        let mut b = automaton();
        let (x0, y0) = b.geometry().wrap(usize::MAX, usize::MAX);
        Shape::Glider.stamp(&mut b, x0, y0);
        assert_eq!(a.frame(), b.frame());
        assert_eq!(a.population(), 5);
    }

    #[test]
    fn test_pulsar_is_symmetric() {
        let cells = Shape::Pulsar.cells();
        for &(x, y) in &cells {
            assert!(cells.contains(&(12 - x, y)));
            assert!(cells.contains(&(x, 12 - y)));
            assert!(cells.contains(&(y, x)));
        }
    }

    #[test]
    fn test_stamp_at_anchor() {
        let mut a = automaton();
        Shape::Lwss.stamp(&mut a, 10, 4);
        let g = a.grid();
        assert!(g.get(10, 4));
        assert!(g.get(13, 4));
        assert!(g.get(14, 5));
        assert!(g.get(11, 7));
        assert!(!g.get(11, 4));
        assert_eq!(a.population(), 9);
    }

    #[test]
    fn test_vertical_lines_layout() {
        let mut a = automaton();
        Preset::VerticalLines.stamp(&mut a);
        assert_eq!(a.population(), 2 * 12);
        assert!(a.grid().get(8, 2));
        assert!(a.grid().get(24, 13));
        assert!(!a.grid().get(8, 14));
    }

    #[test]
    fn test_glider_field_places_eighteen() {
        let mut a = automaton();
        assert_eq!(Preset::GliderField.stamp(&mut a), 0);
        assert_eq!(a.population(), 18 * 5);
    }

    #[test]
    fn test_spaceship_fleet_wraps_negative_anchor() {
        let mut a = automaton();
        Preset::SpaceshipFleet.stamp(&mut a);
        assert_eq!(a.population(), 4 * 9);
        // Top rows anchor at H/4 - 4 = 0
        assert!(a.grid().get(4, 0));
    }

    #[test]
    fn test_presets_fit_default_grid() {
        for preset in Preset::all() {
            let mut a = automaton();
            assert_eq!(preset.stamp(&mut a), 0, "{}", preset.name());
            assert!(a.population() > 0, "{}", preset.name());
        }
    }

    #[test]
    fn test_from_index_wraps() {
        assert_eq!(Preset::from_index(0), Preset::VerticalLines);
        assert_eq!(Preset::from_index(Preset::COUNT + 1), Preset::GliderField);
        for preset in Preset::all() {
            assert_eq!(Preset::from_index(preset.index()), preset);
        }
    }

    #[test]
    fn test_soup_is_reproducible() {
        let mut a = automaton();
        let mut b = automaton();
        Preset::Soup { seed: 42 }.stamp(&mut a);
        Preset::Soup { seed: 42 }.stamp(&mut b);
        assert_eq!(a.frame(), b.frame());

        let mut c = automaton();
        Preset::Soup { seed: 43 }.stamp(&mut c);
        assert_ne!(a.frame(), c.frame());
    }

    #[test]
    fn test_reseed_ignores_history() {
        let mut fresh = automaton();
        Preset::Pulsar.stamp(&mut fresh);

        let mut used = automaton();
        Preset::Soup { seed: 9 }.stamp(&mut used);
        for _ in 0..7 {
            used.step(Strategy::FullScan);
        }
        used.clear();
        Preset::Pulsar.stamp(&mut used);

        assert_eq!(fresh.frame(), used.frame());
        assert_eq!(fresh.active().as_slice(), used.active().as_slice());
    }

    #[test]
    fn test_stamp_reports_dropped_cells() {
        let mut a: Automaton<10> = Automaton::new(Geometry::new(32, 16).unwrap());
        assert_eq!(Shape::Lwss.stamp(&mut a, 0, 0), 0);
        assert_eq!(Shape::Glider.stamp(&mut a, 20, 5), 4);
        assert_eq!(a.population(), 10);
    }
}
