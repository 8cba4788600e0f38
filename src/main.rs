//! MOSSVALE: a tiny tile-based action RPG
//!
//! The host loop is deliberately thin: poll input once, tick the scene
//! machine once, draw once, present. Everything interesting lives in the
//! scene machine and the modules it pulls in (tilemap, tilesets, collision,
//! camera).

mod animation;
mod camera;
mod collision;
mod constants;
mod entities;
mod input;
mod scene;
mod tilemap;
mod tileset;

use macroquad::prelude::*;

use input::FrameInput;
use scene::{SceneFlow, SceneManager};

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Mossvale v{}", VERSION),
        window_width: 640,
        window_height: 480,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // The scene set is created once and persists; the start scene loads here.
    let mut scenes = match SceneManager::new() {
        Ok(scenes) => scenes,
        Err(e) => {
            eprintln!("failed to load the initial scene: {}", e);
            return;
        }
    };

    loop {
        let input = FrameInput::poll();
        match scenes.update(&input) {
            Ok(SceneFlow::Running) => {}
            Ok(SceneFlow::Quit) => break,
            Err(e) => {
                // A scene failed to load mid-transition; nothing was
                // entered half-initialized, so just shut down.
                eprintln!("scene load failed: {}", e);
                break;
            }
        }
        scenes.draw();
        next_frame().await;
    }
}
