//! Title scene: a colored screen and a prompt, nothing to load.

use macroquad::prelude::*;

use crate::input::FrameInput;
use crate::tileset::LoadError;

use super::{Scene, SceneId};

pub struct StartScene {
    loaded: bool,
}

impl StartScene {
    pub fn new() -> StartScene {
        StartScene { loaded: false }
    }
}

impl Scene for StartScene {
    fn start(&mut self) -> Result<(), LoadError> {
        self.loaded = true;
        Ok(())
    }

    fn update(&mut self, input: &FrameInput) -> SceneId {
        if input.confirm_pressed {
            return SceneId::Game;
        }
        SceneId::Start
    }

    fn draw(&mut self) {
        super::set_virtual_camera();
        clear_background(Color::from_rgba(255, 0, 0, 255));
        draw_text("Press enter to start", 8.0, 16.0, 16.0, WHITE);
    }

    fn on_enter(&mut self) {
        println!("enter start scene");
    }

    fn on_exit(&mut self) {
        println!("exit start scene");
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }
}
