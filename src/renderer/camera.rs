//! Smoothed follow camera
//!
//! Rendering-side only: the simulation tracks a raw scroll offset, and the
//! camera eases toward it so fast ascents do not snap the viewport.

use glam::Vec2;

use crate::consts::{CAMERA_BLEND, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Viewport center, interpolated toward the simulation's camera offset
#[derive(Debug, Clone, Copy)]
pub struct FollowCamera {
    pub pos: Vec2,
}

impl FollowCamera {
    pub fn new() -> Self {
        Self {
            pos: Self::target(0.0),
        }
    }

    fn target(camera_y: f32) -> Vec2 {
        Vec2::new(SCREEN_WIDTH / 2.0, camera_y + SCREEN_HEIGHT / 2.0)
    }

    /// Blend toward the current scroll offset (call once per rendered frame)
    pub fn update(&mut self, camera_y: f32) {
        self.pos = self.pos.lerp(Self::target(camera_y), CAMERA_BLEND);
    }

    /// Jump straight to the target (used on restart)
    pub fn snap(&mut self, camera_y: f32) {
        self.pos = Self::target(camera_y);
    }
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new()
    }
}
