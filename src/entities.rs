//! Game entities
//!
//! Plain data structs: position plus per-frame displacement. Image handles
//! live with the owning scene, which pairs each entity kind with its
//! texture at draw time; keeping GPU state out of here lets movement, chase
//! and pickup logic run headless in tests.

use crate::animation::Animation;
use crate::constants::ENEMY_CHASE_STEP;

/// A moving body: world-space position and this tick's displacement.
#[derive(Debug, Clone, Default)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
}

impl Sprite {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, dx: 0.0, dy: 0.0 }
    }
}

/// Facing, derived every frame from the sign of the displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down = 0,
    Up = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    /// x takes priority over y, matching the animation selection of the
    /// original sheet layout. Returns `None` when idle.
    pub fn from_velocity(dx: f32, dy: f32) -> Option<Direction> {
        if dx > 0.0 {
            Some(Direction::Right)
        } else if dx < 0.0 {
            Some(Direction::Left)
        } else if dy > 0.0 {
            Some(Direction::Down)
        } else if dy < 0.0 {
            Some(Direction::Up)
        } else {
            None
        }
    }
}

pub struct Player {
    pub sprite: Sprite,
    pub health: u32,
    /// One walk cycle per facing, indexed by `Direction as usize`.
    pub animations: [Animation; 4],
}

impl Player {
    pub fn new(x: f32, y: f32, health: u32, animations: [Animation; 4]) -> Self {
        Self { sprite: Sprite::new(x, y), health, animations }
    }

    /// The walk cycle for the current facing, or `None` when idle.
    pub fn active_animation(&mut self) -> Option<&mut Animation> {
        let dir = Direction::from_velocity(self.sprite.dx, self.sprite.dy)?;
        Some(&mut self.animations[dir as usize])
    }

    /// Frame index to draw this tick (idle falls back to frame 0).
    pub fn current_frame(&mut self) -> usize {
        self.active_animation().map(|a| a.frame()).unwrap_or(0)
    }
}

pub struct Enemy {
    pub sprite: Sprite,
    pub follows_player: bool,
}

impl Enemy {
    pub fn new(x: f32, y: f32, follows_player: bool) -> Self {
        Self { sprite: Sprite::new(x, y), follows_player }
    }

    /// Greedy chase: nudge this tick's displacement by exactly one step per
    /// axis toward the player. Deliberately not normalized, so a diagonal
    /// chase is faster than an axis-aligned one.
    pub fn chase_step(&mut self, player_x: f32, player_y: f32) {
        if !self.follows_player {
            return;
        }
        if self.sprite.x < player_x {
            self.sprite.dx += ENEMY_CHASE_STEP;
        } else if self.sprite.x > player_x {
            self.sprite.dx -= ENEMY_CHASE_STEP;
        }
        if self.sprite.y < player_y {
            self.sprite.dy += ENEMY_CHASE_STEP;
        } else if self.sprite.y > player_y {
            self.sprite.dy -= ENEMY_CHASE_STEP;
        }
    }
}

pub struct Potion {
    pub sprite: Sprite,
    pub heal_amount: u32,
    /// Set on pickup so the heal applies exactly once.
    pub consumed: bool,
}

impl Potion {
    pub fn new(x: f32, y: f32, heal_amount: u32) -> Self {
        Self { sprite: Sprite::new(x, y), heal_amount, consumed: false }
    }

    /// Pickup trigger: the first tick the player has passed the potion on
    /// the x axis, heal and mark consumed. Returns true on the tick the
    /// heal happened.
    pub fn try_pickup(&mut self, player_x: f32, health: &mut u32) -> bool {
        if self.consumed || player_x <= self.sprite.x {
            return false;
        }
        *health += self.heal_amount;
        self.consumed = true;
        true
    }
}
