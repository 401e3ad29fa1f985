use macroquad::math::{vec2, Vec2};

/// Screen-space offset applied to everything drawn in map space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    /// Horizontal offset in pixels.
    pub x: f32,
    /// Vertical offset in pixels.
    pub y: f32,
}

impl Camera {
    /// Camera with the given offset.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Centres `(target_x, target_y)` on a `screen_w` x `screen_h` screen.
    pub fn follow_target(&mut self, target_x: f32, target_y: f32, screen_w: f32, screen_h: f32) {
        self.x = -target_x + screen_w / 2.0;
        self.y = -target_y + screen_h / 2.0;
    }

    /// Keeps the map covering the screen: the offset stays within
    /// `[screen - map, 0]` on each axis. A map smaller than the screen is
    /// pinned to the top-left corner.
    pub fn constrain(&mut self, map_w: f32, map_h: f32, screen_w: f32, screen_h: f32) {
        self.x = self.x.max(screen_w - map_w).min(0.0);
        self.y = self.y.max(screen_h - map_h).min(0.0);
    }

    /// Offset to add to map-space positions.
    pub fn offset(&self) -> Vec2 {
        vec2(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_centres_target() {
        let mut cam = Camera::default();
        cam.follow_target(400.0, 300.0, 640.0, 480.0);
        assert_eq!(cam.offset(), vec2(-80.0, -60.0));
    }

    #[test]
    fn constrain_clamps_to_map_edges() {
        let mut cam = Camera::default();
        cam.follow_target(8.0, 8.0, 640.0, 480.0);
        cam.constrain(1000.0, 1000.0, 640.0, 480.0);
        assert_eq!(cam.offset(), Vec2::ZERO);

        cam.follow_target(990.0, 990.0, 640.0, 480.0);
        cam.constrain(1000.0, 1000.0, 640.0, 480.0);
        assert_eq!(cam.offset(), vec2(-360.0, -520.0));
    }

    #[test]
    fn small_map_stays_at_origin() {
        let mut cam = Camera::new(-50.0, -50.0);
        cam.constrain(320.0, 240.0, 640.0, 480.0);
        assert_eq!(cam.offset(), Vec2::ZERO);
    }
}
