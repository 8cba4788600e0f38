//! Axis-aligned collision resolution
//!
//! Colliders are static rectangles loaded once per scene. Moving sprites are
//! resolved one axis at a time: the caller applies the x displacement,
//! resolves horizontally, then applies the y displacement and resolves
//! vertically. Resolving both axes from the pre-move position is rejected on
//! purpose: it breaks the slide-along-wall feel when moving diagonally into
//! a corner.

use crate::constants::TILE_SIZE;
use crate::entities::Sprite;

/// A static impassable rectangle in world-space pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collider {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Collider {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    /// Strict interior overlap: rectangles that only share an edge do not
    /// overlap. Resolution clamps sprites flush against collider edges, so
    /// edge contact must not re-trigger.
    pub fn overlaps(&self, other: &Collider) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }
}

/// The sprite's current bounding box, one grid cell in size.
fn sprite_box(sprite: &Sprite) -> Collider {
    let x = sprite.x as i32;
    let y = sprite.y as i32;
    Collider::new(x, y, x + TILE_SIZE, y + TILE_SIZE)
}

/// Push the sprite out of any collider it penetrates on the x axis.
///
/// Scans colliders in insertion order; under multi-collider overlap the
/// last write wins, which keeps resolution deterministic.
pub fn resolve_horizontal(sprite: &mut Sprite, colliders: &[Collider]) {
    for collider in colliders {
        if collider.overlaps(&sprite_box(sprite)) {
            if sprite.dx > 0.0 {
                sprite.x = (collider.min_x - TILE_SIZE) as f32;
            } else if sprite.dx < 0.0 {
                sprite.x = collider.max_x as f32;
            }
        }
    }
}

/// Push the sprite out of any collider it penetrates on the y axis.
pub fn resolve_vertical(sprite: &mut Sprite, colliders: &[Collider]) {
    for collider in colliders {
        if collider.overlaps(&sprite_box(sprite)) {
            if sprite.dy > 0.0 {
                sprite.y = (collider.min_y - TILE_SIZE) as f32;
            } else if sprite.dy < 0.0 {
                sprite.y = collider.max_y as f32;
            }
        }
    }
}
