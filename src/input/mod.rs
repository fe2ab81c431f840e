use macroquad::prelude::*;
use ::rand::Rng;

use crate::application::{ModeSwitch, Simulation};
use crate::domain::Preset;

/// Number keys select presets, in `Preset::all()` order
const PRESET_KEYS: [KeyCode; Preset::COUNT] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
];

/// Raise the mode flag for a pressed preset key.
/// Stands in for the mode-select interrupt: it only sets the flag, the
/// simulation reseeds at its next generation boundary.
pub fn handle_preset_keys(switch: &ModeSwitch) {
    for (index, key) in PRESET_KEYS.iter().enumerate() {
        if is_key_pressed(*key) {
            switch.request(index);
        }
    }
}

/// Process keyboard input functionally
pub fn process_keyboard_input(state: Simulation, switch: &ModeSwitch) -> Simulation {
    type KeyAction = (KeyCode, fn(Simulation) -> Simulation);

    let actions: [KeyAction; 5] = [
        (KeyCode::Space, Simulation::toggle_running),
        (KeyCode::N, Simulation::request_step),
        (KeyCode::S, Simulation::cycle_strategy),
        (KeyCode::Up, |s| s.adjust_speed(1.0)),
        (KeyCode::Down, |s| s.adjust_speed(-1.0)),
    ];

    let mut new_state = actions.iter().fold(state, |s, (key, action)| {
        if is_key_pressed(*key) { action(s) } else { s }
    });

    // Fresh soup with 'R'
    if is_key_pressed(KeyCode::R) {
        new_state.soup_seed = ::rand::rng().random();
        switch.request(Preset::Soup { seed: new_state.soup_seed }.index());
    }

    new_state
}
