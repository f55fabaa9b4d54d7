//! Sky Hopper - an endless jumper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, landing resolution, platform generation)
//! - `renderer`: WebGPU rendering pipeline and HUD
//! - `scores`: In-session leaderboard

pub mod renderer;
pub mod scores;
pub mod sim;

pub use scores::ScoreBoard;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (the sim is tuned in per-frame units at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical screen dimensions
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Horizontal speed imparted by the left/right keys (per frame)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Downward acceleration applied every frame
    pub const GRAVITY: f32 = 0.5;
    /// Upward velocity granted by a standard or crumbling platform
    pub const JUMP_SPEED: f32 = 15.0;
    /// Upward velocity granted by a bouncy platform
    pub const SUPER_JUMP_SPEED: f32 = 50.0;

    /// Platform defaults
    pub const PLATFORM_WIDTH: f32 = 80.0;
    pub const PLATFORM_HEIGHT: f32 = 10.0;
    /// Horizontal spawn band is [SPAWN_MARGIN, SCREEN_WIDTH - SPAWN_MARGIN]
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Platforms are generated up to this far above the visible window
    pub const GEN_LOOKAHEAD: f32 = 100.0;
    /// Platforms this far below the camera are culled
    pub const CULL_MARGIN: f32 = 50.0;
    /// The player falling this far below the camera ends the run
    pub const FALL_MARGIN: f32 = 50.0;
    /// Base vertical gap between spawned platforms
    pub const BASE_GAP: f32 = 60.0;
    /// The gap widens by score / GAP_SCORE_DIVISOR
    pub const GAP_SCORE_DIVISOR: f32 = 10.0;
    /// Crumbling-platform probability is score / CRUMBLE_SCORE_SCALE
    pub const CRUMBLE_SCORE_SCALE: f32 = 1700.0;

    /// Camera smoothing blend factor per rendered frame
    pub const CAMERA_BLEND: f32 = 0.15;
}

/// Kinematic bound on the vertical gap between platforms: time to apex
/// (`JUMP_SPEED / GRAVITY` frames) times average velocity (`JUMP_SPEED / 2`).
#[inline]
pub fn max_jump_height() -> f32 {
    (consts::JUMP_SPEED / consts::GRAVITY) * consts::JUMP_SPEED / 2.0
}
