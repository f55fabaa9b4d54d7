//! Landing detection over the platform set
//!
//! The player's bounding box is tested against platform boxes through a
//! uniform spatial hash grid rebuilt each frame. The grid keeps the landing
//! pass from scanning every platform, and its candidate order is whatever the
//! bucket traversal yields - callers must not rely on it.

use std::collections::HashMap;

use glam::Vec2;

use super::state::Platform;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap test; boxes that merely touch do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Grid cell edge length. Platforms are 80 units wide, so a box spans at
/// most a few cells.
const CELL_SIZE: f32 = 64.0;

/// Uniform spatial hash over platform indices
#[derive(Debug, Default)]
pub struct SpatialGrid {
    buckets: HashMap<(i32, i32), Vec<usize>>,
}

impl SpatialGrid {
    /// Index every platform into the cells its bounding box covers
    pub fn build(platforms: &[Platform]) -> Self {
        let mut grid = Self::default();
        for (idx, platform) in platforms.iter().enumerate() {
            let aabb = platform.aabb();
            for cell in cells_covering(&aabb) {
                grid.buckets.entry(cell).or_default().push(idx);
            }
        }
        grid
    }

    /// Indices of platforms whose cells intersect `aabb`, each reported once.
    ///
    /// Candidates are gathered bucket by bucket; the resulting order is an
    /// artifact of the traversal, not a contract. When several platforms
    /// overlap the player in the same frame, the landing pass lets the last
    /// candidate win, so that outcome is order-dependent by design.
    pub fn query(&self, aabb: &Aabb) -> Vec<usize> {
        let mut candidates = Vec::new();
        for cell in cells_covering(aabb) {
            if let Some(bucket) = self.buckets.get(&cell) {
                candidates.extend_from_slice(bucket);
            }
        }
        candidates.sort_unstable();
        candidates.dedup();
        candidates
    }
}

/// Iterate the grid cells covered by a bounding box
fn cells_covering(aabb: &Aabb) -> impl Iterator<Item = (i32, i32)> {
    let x0 = (aabb.min.x / CELL_SIZE).floor() as i32;
    let x1 = (aabb.max.x / CELL_SIZE).floor() as i32;
    let y0 = (aabb.min.y / CELL_SIZE).floor() as i32;
    let y1 = (aabb.max.y / CELL_SIZE).floor() as i32;
    (x0..=x1).flat_map(move |cx| (y0..=y1).map(move |cy| (cx, cy)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PlatformKind;

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_center_size(Vec2::new(0.0, 0.0), Vec2::new(40.0, 40.0));
        let b = Aabb::from_center_size(Vec2::new(30.0, 0.0), Vec2::new(40.0, 40.0));
        assert!(a.overlaps(&b));

        let c = Aabb::from_center_size(Vec2::new(100.0, 0.0), Vec2::new(40.0, 40.0));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_aabb_touching_is_not_overlap() {
        let a = Aabb::from_center_size(Vec2::new(0.0, 0.0), Vec2::new(40.0, 40.0));
        let b = Aabb::from_center_size(Vec2::new(40.0, 0.0), Vec2::new(40.0, 40.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_grid_finds_platform_under_player() {
        let platforms = vec![
            Platform::new(Vec2::new(200.0, 50.0), PlatformKind::Standard),
            Platform::new(Vec2::new(200.0, 500.0), PlatformKind::Standard),
        ];
        let grid = SpatialGrid::build(&platforms);

        let player = Aabb::from_center_size(Vec2::new(200.0, 60.0), Vec2::new(40.0, 40.0));
        let hits = grid.query(&player);
        assert!(hits.contains(&0));
        assert!(!hits.contains(&1));
    }

    #[test]
    fn test_grid_reports_spanning_platform_once() {
        // An 80-wide platform straddles cell boundaries; the query must
        // still report it a single time.
        let platforms = vec![Platform::new(Vec2::new(64.0, 64.0), PlatformKind::Standard)];
        let grid = SpatialGrid::build(&platforms);

        let query = Aabb::from_center_size(Vec2::new(64.0, 64.0), Vec2::new(200.0, 200.0));
        assert_eq!(grid.query(&query), vec![0]);
    }

    #[test]
    fn test_grid_query_miss() {
        let platforms = vec![Platform::new(Vec2::new(200.0, 50.0), PlatformKind::Standard)];
        let grid = SpatialGrid::build(&platforms);

        let far = Aabb::from_center_size(Vec2::new(200.0, 5000.0), Vec2::new(40.0, 40.0));
        assert!(grid.query(&far).is_empty());
    }
}
