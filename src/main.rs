use clap::{Parser, ValueEnum};
use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oled_life::{
    application::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH},
    domain::{Geometry, DEFAULT_SOUP_SEED},
    input,
    rendering::{self, OledWindow},
    Config, ModeSwitch, Preset, Simulation, Strategy,
};

/// Process exit status for a configuration that fails validation
const EXIT_INVALID_CONFIG: i32 = 2;

/// Mode-select flag, the same shape an interrupt handler would write to
static MODE_SWITCH: ModeSwitch = ModeSwitch::new();

#[derive(Parser, Debug)]
#[command(author, version, about = "Game of Life on a simulated 128x64 OLED", long_about = None)]
struct Args {
    /// Pixels per cell edge (1 runs the automaton at full panel resolution)
    #[arg(short, long, default_value_t = 4)]
    block: usize,

    /// Generations per second
    #[arg(short, long, default_value_t = 10.0)]
    fps: f32,

    /// How each generation is computed
    #[arg(short, long, value_enum, default_value = "adaptive")]
    strategy: StrategyArg,

    /// Initial seed pattern
    #[arg(short, long, value_enum, default_value = "gliders")]
    preset: PresetArg,

    /// Seed for the random soup preset
    #[arg(long, default_value_t = DEFAULT_SOUP_SEED)]
    seed: u64,

    /// Start paused
    #[arg(long)]
    paused: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    Full,
    Sparse,
    Adaptive,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Full => Strategy::FullScan,
            StrategyArg::Sparse => Strategy::Sparse,
            StrategyArg::Adaptive => Strategy::Adaptive,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PresetArg {
    Lines,
    Gliders,
    Spaceships,
    Pulsar,
    TwinPulsars,
    Soup,
}

impl PresetArg {
    fn into_preset(self, seed: u64) -> Preset {
        match self {
            PresetArg::Lines => Preset::VerticalLines,
            PresetArg::Gliders => Preset::GliderField,
            PresetArg::Spaceships => Preset::SpaceshipFleet,
            PresetArg::Pulsar => Preset::Pulsar,
            PresetArg::TwinPulsars => Preset::TwinPulsars,
            PresetArg::Soup => Preset::Soup { seed },
        }
    }
}

impl Args {
    fn config(&self) -> Config {
        Config {
            block_size: self.block,
            updates_per_second: self.fps,
            strategy: self.strategy.into(),
            preset: self.preset.into_preset(self.seed),
            start_paused: self.paused,
            ..Config::default()
        }
    }
}

fn window_conf() -> Conf {
    let (width, height) = Geometry::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
        .map(rendering::window_size)
        .unwrap_or((800.0, 480.0));

    Conf {
        window_title: "OLED Life".to_owned(),
        window_width: width as i32,
        window_height: height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "oled_life=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = args.config();

    let mut state: Simulation = match Simulation::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            error!("invalid configuration: {}", e);
            std::process::exit(EXIT_INVALID_CONFIG);
        }
    };
    let mut window = OledWindow::new(state.display_geometry());
    state.present(&mut window);

    info!(
        grid = ?state.logical_geometry().dimensions(),
        block = config.block_size,
        strategy = state.strategy.name(),
        "started"
    );

    loop {
        input::handle_preset_keys(&MODE_SWITCH);
        state = input::process_keyboard_input(state, &MODE_SWITCH);

        state = state.tick(get_frame_time(), &MODE_SWITCH, &mut window);

        clear_background(BLACK);
        window.draw();
        rendering::draw_status(&state);

        next_frame().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_block_fails_with_nonzero_status() {
        let args = Args::try_parse_from(["oled_life", "--block", "3"]).unwrap();
        let state: Result<Simulation, _> = Simulation::from_config(&args.config());
        assert!(state.is_err());
        assert_ne!(EXIT_INVALID_CONFIG, 0);
    }

    #[test]
    fn test_default_args_build_a_simulation() {
        let args = Args::try_parse_from(["oled_life"]).unwrap();
        let state: Result<Simulation, _> = Simulation::from_config(&args.config());
        assert!(state.is_ok());
    }
}
