//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, SpatialGrid};
pub use state::{GamePhase, GameState, Platform, PlatformKind, Player};
pub use tick::{Key, generate_platforms, key_down, key_up, tick};
