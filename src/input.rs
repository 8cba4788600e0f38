//! Per-tick input snapshot
//!
//! The keyboard is polled exactly once per tick into a plain struct; scenes
//! consume the snapshot and never touch raw key state themselves. Keeps the
//! update path deterministic and lets tests drive scenes with hand-built
//! input frames.

use macroquad::prelude::{is_key_down, is_key_pressed, KeyCode};

/// Everything the scenes can ask of the keyboard this tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Held movement keys (W/S/A/D)
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Edge-triggered scene controls
    pub pause_pressed: bool,
    pub confirm_pressed: bool,
    pub quit_pressed: bool,
}

impl FrameInput {
    /// Snapshot the current macroquad key state. Call once per tick.
    pub fn poll() -> FrameInput {
        FrameInput {
            up: is_key_down(KeyCode::W),
            down: is_key_down(KeyCode::S),
            left: is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::D),
            pause_pressed: is_key_pressed(KeyCode::P),
            confirm_pressed: is_key_pressed(KeyCode::Enter),
            quit_pressed: is_key_pressed(KeyCode::Q),
        }
    }
}
