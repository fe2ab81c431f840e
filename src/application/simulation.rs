use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::config::{Config, ConfigError};
use crate::application::mode::ModeSwitch;
use crate::application::presentation::{FrameSink, Presenter};
use crate::domain::{
    Automaton, Geometry, Preset, StepReport, Strategy, DEFAULT_SOUP_SEED, MAX_ACTIVE_CELLS,
};

/// Simulation orchestrates one automaton and its display.
/// Mode changes are only looked at between generations.
pub struct Simulation<const N: usize = MAX_ACTIVE_CELLS> {
    pub automaton: Automaton<N>,
    presenter: Presenter,
    pub strategy: Strategy,
    pub preset: Preset,
    pub soup_seed: u64,
    pub is_running: bool,
    pub update_timer: f32,
    pub updates_per_second: f32,
    /// Run exactly one generation on the next tick, even while paused
    pub step_requested: bool,
    pub last_report: Option<StepReport>,
    pub last_step_time_ms: f32,
}

impl<const N: usize> Simulation<N> {
    /// Build from a validated configuration and stamp the initial preset
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let logical = config.logical_geometry()?;

        let mut simulation = Self {
            automaton: Automaton::new(logical),
            presenter: Presenter::new(logical, config.block_size)?,
            strategy: config.strategy,
            preset: config.preset,
            soup_seed: match config.preset {
                Preset::Soup { seed } => seed,
                _ => DEFAULT_SOUP_SEED,
            },
            is_running: !config.start_paused,
            update_timer: 0.0,
            updates_per_second: config.updates_per_second,
            step_requested: false,
            last_report: None,
            last_step_time_ms: 0.0,
        };
        simulation.reseed(config.preset);
        Ok(simulation)
    }

    pub fn logical_geometry(&self) -> Geometry {
        self.automaton.geometry()
    }

    /// Extent of the frames handed to the sink
    pub fn display_geometry(&self) -> Geometry {
        self.presenter.display(self.automaton.geometry())
    }

    /// Clear everything and stamp `preset`
    pub fn reseed(&mut self, preset: Preset) {
        self.automaton.clear();
        let dropped = preset.stamp(&mut self.automaton);
        self.preset = preset;
        self.last_report = None;

        info!(
            preset = preset.name(),
            population = self.automaton.population(),
            "seeded"
        );
        if dropped > 0 {
            warn!(dropped, preset = preset.name(), "active set full while seeding");
        }
    }

    /// Consume a pending preset request. Returns true if the grid was reseeded.
    pub fn poll_mode(&mut self, switch: &ModeSwitch) -> bool {
        match switch.take() {
            Some(index) => {
                self.reseed(Preset::from_index(index).with_seed(self.soup_seed));
                true
            }
            None => false,
        }
    }

    /// Advance one generation
    pub fn step(&mut self) -> StepReport {
        let start = Instant::now();
        let report = self.automaton.step(self.strategy);
        self.last_step_time_ms = start.elapsed().as_secs_f32() * 1000.0;

        if report.strategy != self.strategy && self.strategy == Strategy::Sparse {
            debug!(generation = report.generation, "untracked cells, scanned full grid");
        }
        if report.dropped > 0 {
            warn!(
                generation = report.generation,
                dropped = report.dropped,
                "active set full, cells dropped"
            );
        }
        debug!(?report, elapsed_ms = self.last_step_time_ms, "step");

        self.last_report = Some(report);
        report
    }

    /// Push the current generation to the display
    pub fn present<S: FrameSink + ?Sized>(&mut self, sink: &mut S) {
        self.presenter.present(self.automaton.grid(), sink);
    }

    /// One full loop iteration: mode boundary, step, flush
    pub fn generation<S: FrameSink + ?Sized>(&mut self, switch: &ModeSwitch, sink: &mut S) -> StepReport {
        self.poll_mode(switch);
        let report = self.step();
        self.present(sink);
        report
    }

    /// Set running state (builder pattern)
    pub fn with_running(mut self, running: bool) -> Self {
        self.is_running = running;
        self
    }

    /// Toggle play/pause state
    pub fn toggle_running(mut self) -> Self {
        self.is_running = !self.is_running;
        self
    }

    /// Ask for a single generation on the next tick
    pub fn request_step(mut self) -> Self {
        self.step_requested = true;
        self
    }

    /// Move to the next step strategy
    pub fn cycle_strategy(mut self) -> Self {
        self.strategy = self.strategy.next();
        info!(strategy = self.strategy.name(), "strategy changed");
        self
    }

    /// Adjust simulation speed
    pub fn adjust_speed(mut self, delta: f32) -> Self {
        self.updates_per_second = (self.updates_per_second + delta).clamp(1.0, 60.0);
        self
    }

    /// Update simulation by one frame.
    /// The mode flag is read first; a generation runs when the timer
    /// elapses and the display is refreshed whenever the grid changed.
    pub fn tick<S: FrameSink + ?Sized>(
        mut self,
        delta_time: f32,
        switch: &ModeSwitch,
        sink: &mut S,
    ) -> Self {
        let mut changed = self.poll_mode(switch);

        if self.is_running {
            self.update_timer += delta_time;
            if self.update_timer >= 1.0 / self.updates_per_second {
                self.update_timer = 0.0;
                self.step();
                changed = true;
            }
        } else if self.step_requested {
            self.step();
            changed = true;
        }
        self.step_requested = false;

        if changed {
            self.present(sink);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::presentation::{frame_pixel, FrameRecorder};

    fn simulation(config: Config) -> Simulation {
        Simulation::from_config(&config).unwrap()
    }

    #[test]
    fn test_from_config_seeds_preset() {
        let sim = simulation(Config::default());
        assert_eq!(sim.preset, Preset::GliderField);
        assert_eq!(sim.automaton.population(), 90);
        assert_eq!(sim.display_geometry().dimensions(), (128, 64));
        assert!(sim.is_running);
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = Config { block_size: 5, ..Config::default() };
        assert!(Simulation::<MAX_ACTIVE_CELLS>::from_config(&config).is_err());
    }

    #[test]
    fn test_generation_flushes_display_sized_frame() {
        let mut sim = simulation(Config::default());
        let switch = ModeSwitch::new();
        let mut recorder = FrameRecorder::default();

        let report = sim.generation(&switch, &mut recorder);
        assert_eq!(report.generation, 1);
        assert_eq!(recorder.frames.len(), 1);
        assert_eq!(recorder.frames[0].len(), 1024);

        let grid = sim.automaton.grid();
        for y in 0..64 {
            for x in 0..128 {
                assert_eq!(frame_pixel(&recorder.frames[0], 128, x, y), grid.get(x / 4, y / 4));
            }
        }
    }

    #[test]
    fn test_direct_frames_match_grid() {
        let config = Config { block_size: 1, ..Config::default() };
        let mut sim = simulation(config);
        let mut recorder = FrameRecorder::default();

        sim.generation(&ModeSwitch::new(), &mut recorder);
        assert_eq!(recorder.frames[0], sim.automaton.frame());
    }

    #[test]
    fn test_mode_switch_reseeds_at_boundary() {
        let mut sim = simulation(Config::default());
        let switch = ModeSwitch::new();
        let mut recorder = FrameRecorder::default();

        for _ in 0..5 {
            sim.generation(&switch, &mut recorder);
        }
        switch.request(Preset::Pulsar.index());
        let report = sim.generation(&switch, &mut recorder);

        assert_eq!(sim.preset, Preset::Pulsar);
        // Generation count restarted with the new seed
        assert_eq!(report.generation, 1);
        assert!(!switch.is_pending());
    }

    #[test]
    fn test_reseed_matches_fresh_simulation() {
        let switch = ModeSwitch::new();
        let mut recorder = FrameRecorder::default();

        let mut used = simulation(Config::default());
        for _ in 0..9 {
            used.generation(&switch, &mut recorder);
        }
        used.reseed(Preset::TwinPulsars);

        let fresh = simulation(Config { preset: Preset::TwinPulsars, ..Config::default() });
        assert_eq!(used.automaton.frame(), fresh.automaton.frame());
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let sim = simulation(Config::default());
        let switch = ModeSwitch::new();
        let mut recorder = FrameRecorder::default();

        let sim = sim.tick(0.05, &switch, &mut recorder);
        assert_eq!(sim.automaton.generation(), 0);
        assert!(recorder.frames.is_empty());

        let sim = sim.tick(0.06, &switch, &mut recorder);
        assert_eq!(sim.automaton.generation(), 1);
        assert_eq!(recorder.frames.len(), 1);
    }

    #[test]
    fn test_paused_tick_only_reacts_to_mode_and_single_step() {
        let config = Config { start_paused: true, ..Config::default() };
        let switch = ModeSwitch::new();
        let mut recorder = FrameRecorder::default();

        let sim = simulation(config).tick(1.0, &switch, &mut recorder);
        assert_eq!(sim.automaton.generation(), 0);
        assert!(recorder.frames.is_empty());

        switch.request(Preset::SpaceshipFleet.index());
        let sim = sim.tick(1.0, &switch, &mut recorder);
        assert_eq!(sim.preset, Preset::SpaceshipFleet);
        assert_eq!(recorder.frames.len(), 1);

        let sim = sim.request_step().tick(0.0, &switch, &mut recorder);
        assert_eq!(sim.automaton.generation(), 1);
        assert!(!sim.step_requested);
        assert_eq!(recorder.frames.len(), 2);
    }

    #[test]
    fn test_soup_request_uses_current_seed() {
        let mut sim = simulation(Config::default());
        sim.soup_seed = 77;
        let switch = ModeSwitch::new();
        switch.request(Preset::Soup { seed: 0 }.index());
        sim.poll_mode(&switch);
        assert_eq!(sim.preset, Preset::Soup { seed: 77 });
    }

    #[test]
    fn test_builders() {
        let sim = simulation(Config::default())
            .with_running(false)
            .toggle_running()
            .adjust_speed(100.0)
            .cycle_strategy();
        assert!(sim.is_running);
        assert_eq!(sim.updates_per_second, 60.0);
        assert_eq!(sim.strategy, Strategy::FullScan);
    }
}
