//! Sprite animation data
//!
//! An animation is a frame-index ramp over a sprite sheet: start index, end
//! index, stride between frames (the sheet's column count, so a stride walks
//! down one column), and a tick countdown controlling the frame rate. Simple
//! enough to stay plain data; there is no animation "system".

use macroquad::prelude::Rect;

use crate::constants::TILE_SIZE;

/// A looping frame ramp over sheet indices `first, first+step, ..., last`.
#[derive(Debug, Clone)]
pub struct Animation {
    first: usize,
    last: usize,
    step: usize,
    /// Ticks each frame stays on screen.
    speed_tps: f32,
    frame_counter: f32,
    frame: usize,
}

impl Animation {
    pub fn new(first: usize, last: usize, step: usize, speed_tps: f32) -> Self {
        Self {
            first,
            last,
            step,
            speed_tps,
            frame_counter: speed_tps,
            frame: first,
        }
    }

    /// Advance the tick countdown, stepping to the next frame when it
    /// expires and wrapping past `last` back to `first`.
    pub fn update(&mut self) {
        self.frame_counter -= 1.0;
        if self.frame_counter <= 0.0 {
            self.frame_counter = self.speed_tps;
            self.frame += self.step;
            if self.frame > self.last {
                self.frame = self.first;
            }
        }
    }

    /// Current sheet frame index.
    pub fn frame(&self) -> usize {
        self.frame
    }
}

/// Fixed-grid sprite sheet: maps a flat frame index to a source rectangle.
#[derive(Debug, Clone, Copy)]
pub struct SpriteSheet {
    columns: usize,
    #[allow(dead_code)]
    rows: usize,
    tile_size: usize,
}

impl SpriteSheet {
    pub fn new(columns: usize, rows: usize, tile_size: usize) -> Self {
        Self { columns, rows, tile_size }
    }

    /// One cell per grid index, row-major.
    pub fn rect(&self, index: usize) -> Rect {
        let x = (index % self.columns * self.tile_size) as f32;
        let y = (index / self.columns * self.tile_size) as f32;
        Rect::new(x, y, self.tile_size as f32, self.tile_size as f32)
    }
}

/// The player sheet: 4 direction columns, 7 rows of 16x16 cells.
pub fn player_sheet() -> SpriteSheet {
    SpriteSheet::new(4, 7, TILE_SIZE as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_steps_and_wraps() {
        let mut anim = Animation::new(5, 13, 4, 2.0);
        assert_eq!(anim.frame(), 5);

        // Two ticks per frame: 5 -> 9 -> 13 -> 5
        anim.update();
        assert_eq!(anim.frame(), 5);
        anim.update();
        assert_eq!(anim.frame(), 9);
        anim.update();
        anim.update();
        assert_eq!(anim.frame(), 13);
        anim.update();
        anim.update();
        assert_eq!(anim.frame(), 5);
    }

    #[test]
    fn sheet_rect_is_row_major() {
        let sheet = SpriteSheet::new(4, 7, 16);
        assert_eq!(sheet.rect(0), Rect::new(0.0, 0.0, 16.0, 16.0));
        assert_eq!(sheet.rect(5), Rect::new(16.0, 16.0, 16.0, 16.0));
        assert_eq!(sheet.rect(7), Rect::new(48.0, 16.0, 16.0, 16.0));
    }
}
