//! HUD text rendering
//!
//! A built-in 5x7 bitmap font, emitted as one quad per lit pixel in screen
//! coordinates (the HUD layer is never camera-transformed).

use glam::Vec2;

use super::shapes::rect;
use super::vertex::{Vertex, colors};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{GamePhase, GameState};

/// Glyph cell width in font pixels (5 columns + 1 spacing column)
const GLYPH_ADVANCE: f32 = 6.0;
const GLYPH_ROWS: usize = 7;

/// 5x7 glyph bitmap, one byte per row, bit 4 is the leftmost column
fn glyph(c: char) -> Option<[u8; GLYPH_ROWS]> {
    let rows = match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        ' ' => [0x00; GLYPH_ROWS],
        _ => return None,
    };
    Some(rows)
}

/// Append quads for a text string. `origin` is the top-left corner of the
/// first glyph in screen coordinates (y up); characters without a glyph are
/// skipped.
pub fn text(out: &mut Vec<Vertex>, origin: Vec2, scale: f32, color: [f32; 4], s: &str) {
    let mut pen_x = origin.x;
    for c in s.chars() {
        if let Some(rows) = glyph(c) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..5 {
                    if bits & (0x10 >> col) != 0 {
                        let center = Vec2::new(
                            pen_x + (col as f32 + 0.5) * scale,
                            origin.y - (row as f32 + 0.5) * scale,
                        );
                        rect(out, center, Vec2::splat(scale), color);
                    }
                }
            }
            pen_x += GLYPH_ADVANCE * scale;
        }
    }
}

/// Rendered width of a string at the given scale
pub fn text_width(s: &str, scale: f32) -> f32 {
    s.chars().filter(|&c| glyph(c).is_some()).count() as f32 * GLYPH_ADVANCE * scale
}

fn centered(out: &mut Vec<Vertex>, top_y: f32, scale: f32, color: [f32; 4], s: &str) {
    let x = (SCREEN_WIDTH - text_width(s, scale)) / 2.0;
    text(out, Vec2::new(x, top_y), scale, color, s);
}

/// Build the HUD vertex list: score while playing, plus the game-over panel
pub fn hud_vertices(state: &GameState, session_best: Option<u32>) -> Vec<Vertex> {
    let mut out = Vec::new();

    let score_line = format!("SCORE {}", state.score);
    text(
        &mut out,
        Vec2::new(10.0, SCREEN_HEIGHT - 10.0),
        2.0,
        colors::HUD_TEXT,
        &score_line,
    );

    if state.phase == GamePhase::GameOver {
        centered(
            &mut out,
            SCREEN_HEIGHT / 2.0 + 60.0,
            3.0,
            colors::GAME_OVER_TEXT,
            "GAME OVER",
        );
        centered(
            &mut out,
            SCREEN_HEIGHT / 2.0,
            1.5,
            colors::HUD_TEXT,
            "PRESS R TO RESTART",
        );
        if let Some(best) = session_best {
            centered(
                &mut out,
                SCREEN_HEIGHT / 2.0 - 30.0,
                2.0,
                colors::HUD_TEXT,
                &format!("BEST {}", best),
            );
        }
    }

    out
}
