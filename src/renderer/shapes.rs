//! Shape generation for 2D primitives
//!
//! Builds per-frame vertex lists for the world (platforms, player) in
//! logical screen coordinates; the pipeline maps them to NDC.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::consts::{PLATFORM_HEIGHT, PLATFORM_WIDTH, PLAYER_SIZE};
use crate::sim::{GameState, Platform, PlatformKind};

/// Append vertices for an axis-aligned filled rectangle (two triangles)
pub fn rect(out: &mut Vec<Vertex>, center: Vec2, size: Vec2, color: [f32; 4]) {
    let half = size / 2.0;
    let (x0, y0) = (center.x - half.x, center.y - half.y);
    let (x1, y1) = (center.x + half.x, center.y + half.y);

    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x1, y0, color));
    out.push(Vertex::new(x1, y1, color));

    out.push(Vertex::new(x0, y0, color));
    out.push(Vertex::new(x1, y1, color));
    out.push(Vertex::new(x0, y1, color));
}

/// Append vertices for a filled circle (triangle fan)
pub fn circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }
}

fn platform_color(kind: PlatformKind) -> [f32; 4] {
    match kind {
        PlatformKind::Standard => colors::PLATFORM_STANDARD,
        PlatformKind::Crumbling => colors::PLATFORM_CRUMBLING,
        PlatformKind::Bouncy => colors::PLATFORM_BOUNCY,
    }
}

fn platform_shape(out: &mut Vec<Vertex>, platform: &Platform) {
    rect(
        out,
        platform.pos,
        Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT),
        platform_color(platform.kind),
    );
}

/// The player sprite: a filled disc with two eye dots
fn player_shape(out: &mut Vec<Vertex>, pos: Vec2) {
    circle(out, pos, PLAYER_SIZE / 2.0, colors::PLAYER, 24);
    circle(out, pos + Vec2::new(-7.0, 5.0), 3.0, colors::PLAYER_EYE, 10);
    circle(out, pos + Vec2::new(7.0, 5.0), 3.0, colors::PLAYER_EYE, 10);
}

/// Build the world vertex list for one frame (camera applied later)
pub fn world_vertices(state: &GameState) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(state.platforms.len() * 6 + 24 * 3 + 2 * 10 * 3);
    for platform in &state.platforms {
        platform_shape(&mut out, platform);
    }
    player_shape(&mut out, state.player.pos);
    out
}
