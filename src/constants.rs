//! Tuning constants shared across the runtime

/// Grid cell size in pixels. Sprites, colliders and tiles are all one cell.
pub const TILE_SIZE: i32 = 16;

/// Same cell size for world-space (float) math.
pub const TILE_SIZE_F: f32 = TILE_SIZE as f32;

/// Virtual viewport the game renders at; the window scales this up.
pub const SCREEN_WIDTH: f32 = 320.0;
pub const SCREEN_HEIGHT: f32 = 240.0;

/// Column count of the uniform tileset sheet.
///
/// This is a property of the art asset, not of the format: the sheet is
/// authored 22 tiles wide, and tile ids wrap at that column. Kept as a
/// constant rather than derived from the image so the id math does not
/// silently change if the sheet is re-exported with padding.
pub const UNIFORM_TILESET_COLUMNS: u32 = 22;

/// Player displacement per tick while a movement key is held.
pub const PLAYER_SPEED: f32 = 2.0;

/// Chasing enemies close in by exactly this much per axis per tick.
/// Not normalized: a diagonal chase covers more ground than an
/// axis-aligned one, which is part of the game's feel.
pub const ENEMY_CHASE_STEP: f32 = 1.0;

/// Root directory that rewritten tileset image paths resolve against.
pub const ASSETS_DIR: &str = "assets";
