//! Scene state machine
//!
//! A fixed set of mutually-exclusive game states, each owning its own
//! entities, map and camera. Scenes are created once at process start and
//! persist across transitions, so a paused game keeps its state; a scene's
//! resources are loaded by `start()` the first time it becomes active.
//!
//! Transition contract, per tick:
//! 1. `next = current.update(input)`
//! 2. `next == Exit`: `current.on_exit()`, signal host shutdown.
//! 3. `next != current`: `current.on_exit()`, then `next.start()` if not yet
//!    loaded (a load failure aborts the transition before `on_enter`), then
//!    `next.on_enter()`, then switch.
//!
//! Every scene may assume its `start()` has completed before `on_enter()`
//! runs.

mod game;
mod pause;
mod start;

pub use game::GameScene;
pub use pause::PauseScene;
pub use start::StartScene;

use macroquad::prelude::{set_camera, Camera2D, Rect};

use crate::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::FrameInput;
use crate::tileset::LoadError;

/// Point macroquad's 2D camera at the 320x240 virtual viewport, origin
/// top-left and y growing down. `from_display_rect` hands back a y-up
/// camera, hence the zoom flip. Scenes call this at the top of `draw`.
pub(crate) fn set_virtual_camera() {
    let mut camera =
        Camera2D::from_display_rect(Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT));
    camera.zoom.y = -camera.zoom.y;
    set_camera(&camera);
}

/// Identity of each game state. `Exit` is terminal and owns no scene; it
/// only signals host shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneId {
    Start,
    Game,
    Pause,
    Exit,
}

impl SceneId {
    /// Storage slot for this scene, `None` for the terminal `Exit` id.
    fn slot(self) -> Option<usize> {
        match self {
            SceneId::Start => Some(0),
            SceneId::Game => Some(1),
            SceneId::Pause => Some(2),
            SceneId::Exit => None,
        }
    }
}

/// The five-operation contract every scene implements.
pub trait Scene {
    /// One-shot resource/entity load, run before the scene's first
    /// `on_enter`. A failure is fatal to the transition.
    fn start(&mut self) -> Result<(), LoadError>;

    /// Advance one tick and name the scene to run next (itself to stay).
    fn update(&mut self, input: &FrameInput) -> SceneId;

    fn draw(&mut self);

    fn on_enter(&mut self);

    fn on_exit(&mut self);

    fn is_loaded(&self) -> bool;
}

/// What the host loop should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneFlow {
    Running,
    Quit,
}

/// Owns the scene set and drives update/draw dispatch and transitions.
pub struct SceneManager {
    scenes: [Box<dyn Scene>; 3],
    current: SceneId,
}

impl SceneManager {
    /// Build the game's scene set and activate the start scene.
    pub fn new() -> Result<SceneManager, LoadError> {
        Self::with_scenes(
            [
                Box::new(StartScene::new()),
                Box::new(GameScene::new()),
                Box::new(PauseScene::new()),
            ],
            SceneId::Start,
        )
    }

    fn with_scenes(scenes: [Box<dyn Scene>; 3], initial: SceneId) -> Result<SceneManager, LoadError> {
        let mut manager = SceneManager { scenes, current: initial };
        // The initial scene gets the same start-before-enter treatment as
        // any transition target.
        manager.activate(initial)?;
        Ok(manager)
    }

    #[allow(dead_code)]
    pub fn current(&self) -> SceneId {
        self.current
    }

    /// Run one tick of the active scene and perform any transition it
    /// requests. `Err` means a scene load failed; the transition was
    /// aborted before `on_enter` and the host should shut down.
    pub fn update(&mut self, input: &FrameInput) -> Result<SceneFlow, LoadError> {
        let Some(slot) = self.current.slot() else {
            return Ok(SceneFlow::Quit);
        };

        let next = self.scenes[slot].update(input);
        if next == SceneId::Exit {
            self.scenes[slot].on_exit();
            return Ok(SceneFlow::Quit);
        }
        if next != self.current {
            self.scenes[slot].on_exit();
            self.activate(next)?;
        }
        Ok(SceneFlow::Running)
    }

    pub fn draw(&mut self) {
        if let Some(slot) = self.current.slot() {
            self.scenes[slot].draw();
        }
    }

    /// Load (first activation only) and enter a scene, then make it
    /// current.
    fn activate(&mut self, id: SceneId) -> Result<(), LoadError> {
        let Some(slot) = id.slot() else {
            return Ok(());
        };
        if !self.scenes[slot].is_loaded() {
            self.scenes[slot].start()?;
        }
        self.scenes[slot].on_enter();
        self.current = id;
        Ok(())
    }
}
