//! Square tile grids around an origin.

use crate::config::TractorConfig;
use crate::state::TilePos;

/// Largest radius a grid is built with; larger requests are clamped.
pub const MAX_RADIUS: u32 = TractorConfig::MAX_DISTANCE as u32;

/// Returns the `(2r+1)²` square of tiles centered on `origin`.
///
/// Tiles are yielded row by row (y ascending, then x ascending). Every call
/// starts a fresh iterator; there is no cached state. `radius` is clamped to
/// [`MAX_RADIUS`].
pub fn tile_grid(origin: TilePos, radius: u32) -> TileGrid {
    TileGrid::new(origin, radius)
}

/// Iterator over a square of tiles. See [`tile_grid`].
#[derive(Clone, Debug)]
pub struct TileGrid {
    origin: TilePos,
    radius: i32,
    dx: i32,
    dy: i32,
}

impl TileGrid {
    fn new(origin: TilePos, radius: u32) -> Self {
        let radius = radius.min(MAX_RADIUS) as i32;
        Self {
            origin,
            radius,
            dx: -radius,
            dy: -radius,
        }
    }

    fn remaining(&self) -> usize {
        if self.dy > self.radius {
            return 0;
        }
        let side = (2 * self.radius + 1) as usize;
        let rows_after = (self.radius - self.dy) as usize;
        let in_row = (self.radius - self.dx + 1) as usize;
        rows_after * side + in_row
    }
}

impl Iterator for TileGrid {
    type Item = TilePos;

    fn next(&mut self) -> Option<TilePos> {
        if self.dy > self.radius {
            return None;
        }
        let tile = self.origin.offset(self.dx, self.dy);
        if self.dx == self.radius {
            self.dx = -self.radius;
            self.dy += 1;
        } else {
            self.dx += 1;
        }
        Some(tile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TileGrid {}
