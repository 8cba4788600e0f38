//! Pause scene
//!
//! The game scene's state is retained untouched while this scene is
//! active; a second pause-toggle resumes it without reloading.

use macroquad::prelude::*;

use crate::input::FrameInput;
use crate::tileset::LoadError;

use super::{Scene, SceneId};

pub struct PauseScene {
    loaded: bool,
}

impl PauseScene {
    pub fn new() -> PauseScene {
        PauseScene { loaded: false }
    }
}

impl Scene for PauseScene {
    fn start(&mut self) -> Result<(), LoadError> {
        self.loaded = true;
        Ok(())
    }

    fn update(&mut self, input: &FrameInput) -> SceneId {
        if input.pause_pressed {
            return SceneId::Game;
        }
        SceneId::Pause
    }

    fn draw(&mut self) {
        super::set_virtual_camera();
        clear_background(Color::from_rgba(0, 255, 0, 255));
        draw_text("Press p to unpause", 8.0, 16.0, 16.0, WHITE);
    }

    fn on_enter(&mut self) {
        println!("enter pause scene");
    }

    fn on_exit(&mut self) {
        println!("exit pause scene");
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }
}
