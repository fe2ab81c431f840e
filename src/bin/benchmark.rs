//! Step-strategy benchmark: full scan vs sparse tracking.
//!
//! Every run owns its own automaton, so runs share nothing and are spread
//! over threads with rayon; each run itself stays single-threaded.

use std::time::Instant;

use rayon::prelude::*;
use oled_life::domain::{Automaton, Geometry, Preset, Strategy};

/// Mean milliseconds per generation
fn benchmark(geometry: Geometry, preset: Preset, strategy: Strategy, iterations: u32) -> f64 {
    let mut automaton: Automaton = Automaton::new(geometry);
    preset.stamp(&mut automaton);

    let start = Instant::now();
    for _ in 0..iterations {
        automaton.step(strategy);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

/// Both strategies on the same seed; returns (full_ms, sparse_ms, population)
fn compare(geometry: Geometry, preset: Preset, iterations: u32) -> (f64, f64, usize) {
    let mut seeded: Automaton = Automaton::new(geometry);
    preset.stamp(&mut seeded);

    let full_ms = benchmark(geometry, preset, Strategy::FullScan, iterations);
    let sparse_ms = benchmark(geometry, preset, Strategy::Sparse, iterations);
    (full_ms, sparse_ms, seeded.population())
}

fn main() {
    println!("=== Step Strategy Benchmark ===\n");

    let sizes = [(32, 16), (64, 32), (128, 64)];
    let iterations = 200;

    let runs: Vec<_> = sizes
        .iter()
        .flat_map(|&(w, h)| Preset::all().into_iter().map(move |p| (w, h, p)))
        .filter_map(|(w, h, p)| Geometry::new(w, h).ok().map(|g| (g, p)))
        .collect();

    let results: Vec<_> = runs
        .par_iter()
        .map(|&(geometry, preset)| (geometry, preset, compare(geometry, preset, iterations)))
        .collect();

    println!(
        "{:>10} {:>12} {:>8} {:>12} {:>12} {:>10}",
        "Grid", "Preset", "Pop", "FullScan", "Sparse", "Speedup"
    );
    println!("{:-<70}", "");

    for (geometry, preset, (full_ms, sparse_ms, population)) in results {
        let (w, h) = geometry.dimensions();
        println!(
            "{:>10} {:>12} {:>8} {:>12.4} {:>12.4} {:>9.1}x",
            format!("{}x{}", w, h),
            preset.name(),
            population,
            full_ms,
            sparse_ms,
            full_ms / sparse_ms.max(f64::EPSILON)
        );
    }
}
