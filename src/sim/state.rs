//! Game state and core simulation types

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player fell below the camera; only a restart leaves this state
    GameOver,
}

/// Platform behavior tag
///
/// Platforms are polymorphic over a single capability: the upward velocity
/// imparted on landing. A tagged variant dispatched by kind keeps that
/// polymorphism without trait objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Standard,
    /// Removed permanently the first time the player lands on it
    Crumbling,
    /// Grants a much larger upward velocity
    Bouncy,
}

impl PlatformKind {
    /// Upward velocity assigned to the player on landing
    pub fn on_landed(self) -> f32 {
        match self {
            PlatformKind::Standard | PlatformKind::Crumbling => JUMP_SPEED,
            PlatformKind::Bouncy => SUPER_JUMP_SPEED,
        }
    }

    /// Whether landing destroys the platform
    pub fn crumbles(self) -> bool {
        matches!(self, PlatformKind::Crumbling)
    }
}

/// A platform entity (axis-aligned, fixed size, position is the center)
#[derive(Debug, Clone, Copy)]
pub struct Platform {
    pub pos: Vec2,
    pub kind: PlatformKind,
}

impl Platform {
    pub fn new(pos: Vec2, kind: PlatformKind) -> Self {
        Self { pos, kind }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.pos, Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT))
    }
}

/// The player entity
#[derive(Debug, Clone, Copy)]
pub struct Player {
    /// Position of the sprite center
    pub pos: Vec2,
    /// Velocity in per-frame units
    pub vel: Vec2,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(SCREEN_WIDTH / 2.0, 100.0),
            vel: Vec2::ZERO,
        }
    }

    /// Advance one frame: integrate position, apply gravity, clamp to screen.
    ///
    /// Gravity is unconditional (it decelerates the player while rising too).
    /// The horizontal clamp corrects the offending edge only; velocity is
    /// left untouched.
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y -= GRAVITY;

        let half = PLAYER_SIZE / 2.0;
        if self.pos.x - half < 0.0 {
            self.pos.x = half;
        } else if self.pos.x + half > SCREEN_WIDTH {
            self.pos.x = SCREEN_WIDTH - half;
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.pos, Vec2::splat(PLAYER_SIZE))
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete game state (deterministic)
///
/// The world exclusively owns the player and the platform collection; it is
/// passed by `&mut` into [`tick`](super::tick::tick) and never aliased.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving platform generation
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    pub player: Player,
    /// Live platforms. Order is irrelevant for the simulation; the highest
    /// platform is queried via [`highest_platform_y`](Self::highest_platform_y).
    pub platforms: Vec<Platform>,
    /// Vertical scroll distance the viewport has advanced (never decreases
    /// while Playing)
    pub camera_y: f32,
    /// Derived from the camera offset: floor(camera_y / 10)
    pub score: u32,
    /// Simulation frame counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            player: Player::new(),
            platforms: Vec::new(),
            camera_y: 0.0,
            score: 0,
            time_ticks: 0,
        };
        state.setup();
        state
    }

    /// (Re-)initialize the world: player, starting platforms, camera, score.
    ///
    /// The RNG stream continues across restarts so reruns within one seed
    /// stay deterministic without repeating the same layout.
    pub fn setup(&mut self) {
        self.player = Player::new();
        self.platforms.clear();

        // Start platform directly under the player
        self.platforms.push(Platform::new(
            Vec2::new(SCREEN_WIDTH / 2.0, 50.0),
            PlatformKind::Standard,
        ));

        // Initial ladder of standard platforms
        for i in 0..10 {
            let x = self
                .rng
                .random_range(SPAWN_MARGIN..=SCREEN_WIDTH - SPAWN_MARGIN);
            let y = 150.0 + i as f32 * 60.0;
            self.platforms
                .push(Platform::new(Vec2::new(x, y), PlatformKind::Standard));
        }

        self.camera_y = 0.0;
        self.score = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
    }

    /// Vertical position of the highest live platform, if any
    pub fn highest_platform_y(&self) -> Option<f32> {
        self.platforms
            .iter()
            .map(|p| p.pos.y)
            .fold(None, |acc, y| Some(acc.map_or(y, |a: f32| a.max(y))))
    }
}
