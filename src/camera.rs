//! World-space camera
//!
//! A single offset applied to every world-space draw call. Updated once per
//! frame: first centered on a target point, then clamped so the viewport
//! never shows area outside the map.

/// Rendering offset in world pixels. Negative values scroll the map
/// left/up past the viewport origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

impl Camera {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Center the viewport on a world-space target point.
    pub fn follow_target(&mut self, target_x: f32, target_y: f32, viewport_w: f32, viewport_h: f32) {
        self.x = -target_x + viewport_w / 2.0;
        self.y = -target_y + viewport_h / 2.0;
    }

    /// Clamp the offset so the visible viewport stays inside
    /// `[0, map_w] x [0, map_h]`.
    ///
    /// If the map is smaller than the viewport on an axis the clamp bounds
    /// invert (min > max); the offset is pinned to 0 on that axis instead
    /// of feeding an invalid range into `clamp`.
    pub fn constrain(&mut self, map_w: f32, map_h: f32, viewport_w: f32, viewport_h: f32) {
        self.x = clamp_offset(self.x, map_w - viewport_w);
        self.y = clamp_offset(self.y, map_h - viewport_h);
    }
}

/// Clamp a camera offset into `[-slack, 0]`, pinning to 0 when the map is
/// not larger than the viewport (`slack <= 0`).
fn clamp_offset(offset: f32, slack: f32) -> f32 {
    if slack <= 0.0 {
        0.0
    } else {
        offset.clamp(-slack, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_centers_target() {
        let mut cam = Camera::default();
        cam.follow_target(100.0, 100.0, 320.0, 240.0);
        assert_eq!(cam.x, 60.0);
        assert_eq!(cam.y, 20.0);
    }

    #[test]
    fn constrain_clamps_to_map_edges() {
        let mut cam = Camera::default();

        // Target near the map origin: unclamped offset would be positive
        cam.follow_target(10.0, 10.0, 320.0, 240.0);
        cam.constrain(640.0, 480.0, 320.0, 240.0);
        assert_eq!((cam.x, cam.y), (0.0, 0.0));

        // Target near the far corner: offset bottoms out at -(map - viewport)
        cam.follow_target(630.0, 470.0, 320.0, 240.0);
        cam.constrain(640.0, 480.0, 320.0, 240.0);
        assert_eq!((cam.x, cam.y), (-320.0, -240.0));
    }

    #[test]
    fn map_equal_to_viewport_pins_offset_to_zero() {
        let mut cam = Camera::default();
        for target in [(0.0, 0.0), (160.0, 120.0), (500.0, -40.0)] {
            cam.follow_target(target.0, target.1, 320.0, 240.0);
            cam.constrain(320.0, 240.0, 320.0, 240.0);
            assert_eq!((cam.x, cam.y), (0.0, 0.0));
        }
    }

    #[test]
    fn map_smaller_than_viewport_pins_offset_to_zero() {
        let mut cam = Camera::default();
        cam.follow_target(50.0, 50.0, 320.0, 240.0);
        cam.constrain(160.0, 120.0, 320.0, 240.0);
        assert_eq!((cam.x, cam.y), (0.0, 0.0));
    }
}
