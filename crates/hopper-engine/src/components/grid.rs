//! Static tile grid the tile collider resolves movement against.
//!
//! Tiles are stored in row-major order (`index = row * width + col`). Row 0 is
//! the top of the level; pixel y grows downward.

use std::ops::Range;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::aabb::Aabb;

/// What a tile is. Only the collider cares about `collidable`; the kind is
/// carried for the host renderer and for block lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Ground,
    Pipe,
    Brick,
    CoinBlock,
    /// Bushes, clouds, and other background dressing.
    Scenery,
}

/// A single tile in the grid. `None` in the grid means empty sky.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub kind: TileKind,
    pub collidable: bool,
}

impl Tile {
    /// Create a tile; everything except scenery blocks movement.
    pub fn new(kind: TileKind) -> Self {
        Self {
            kind,
            collidable: kind != TileKind::Scenery,
        }
    }
}

/// Half-open cell index ranges covered by a pixel-space box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSpan {
    pub cols: Range<i32>,
    pub rows: Range<i32>,
}

/// Tile grid for a level. Immutable after load.
#[derive(Debug, Clone)]
pub struct TileGrid {
    /// Width of the grid in tiles.
    pub width: u32,
    /// Height of the grid in tiles.
    pub height: u32,
    /// Edge length of one tile in pixels.
    pub tile_size: f32,
    tiles: Vec<Option<Tile>>,
}

impl TileGrid {
    /// Create an empty (all sky) grid.
    pub fn new(width: u32, height: u32, tile_size: f32) -> Self {
        let count = width as usize * height as usize;
        Self {
            width,
            height,
            tile_size,
            tiles: vec![None; count],
        }
    }

    /// Tile at grid position `(col, row)`. Anything outside the grid is sky.
    pub fn tile_at(&self, col: i32, row: i32) -> Option<&Tile> {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return None;
        }
        self.tiles[(row as u32 * self.width + col as u32) as usize].as_ref()
    }

    /// Whether the tile at `(col, row)` blocks movement.
    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        self.tile_at(col, row).is_some_and(|t| t.collidable)
    }

    /// Set a tile at grid position `(col, row)`. Out-of-range writes are ignored.
    pub fn set(&mut self, col: u32, row: u32, tile: Option<Tile>) {
        if col < self.width && row < self.height {
            self.tiles[(row * self.width + col) as usize] = tile;
        }
    }

    /// Fill a rectangular region with a tile, clipped to the grid.
    pub fn fill_rect(&mut self, col: u32, row: u32, w: u32, h: u32, tile: Option<Tile>) {
        for r in row..row.saturating_add(h).min(self.height) {
            for c in col..col.saturating_add(w).min(self.width) {
                self.set(c, r, tile);
            }
        }
    }

    /// Level width in pixels.
    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tile_size
    }

    /// Level height in pixels. Anything whose top passes this has fallen out.
    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tile_size
    }

    /// Pixel-space box of the cell at `(col, row)`.
    pub fn cell_rect(&self, col: i32, row: i32) -> Aabb {
        Aabb::new(
            col as f32 * self.tile_size,
            row as f32 * self.tile_size,
            self.tile_size,
            self.tile_size,
        )
    }

    /// Cell containing a pixel position (may lie outside the grid).
    pub fn cell_of(&self, pos: Vec2) -> (i32, i32) {
        (
            (pos.x / self.tile_size).floor() as i32,
            (pos.y / self.tile_size).floor() as i32,
        )
    }

    /// Every cell the box overlaps with positive area. A box whose edge lies
    /// exactly on a cell boundary does not cover the neighbouring cell.
    pub fn cells_overlapping(&self, rect: &Aabb) -> CellSpan {
        let ts = self.tile_size;
        CellSpan {
            cols: (rect.left() / ts).floor() as i32..(rect.right() / ts).ceil() as i32,
            rows: (rect.top() / ts).floor() as i32..(rect.bottom() / ts).ceil() as i32,
        }
    }

    /// Count of non-empty tiles.
    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let grid = TileGrid::new(10, 8, 32.0);
        assert_eq!(grid.tile_count(), 0);
        assert_eq!(grid.pixel_width(), 320.0);
        assert_eq!(grid.pixel_height(), 256.0);
    }

    #[test]
    fn set_and_lookup() {
        let mut grid = TileGrid::new(5, 5, 32.0);
        grid.set(2, 3, Some(Tile::new(TileKind::Pipe)));
        let tile = grid.tile_at(2, 3).unwrap();
        assert_eq!(tile.kind, TileKind::Pipe);
        assert!(grid.is_solid(2, 3));
        assert!(!grid.is_solid(3, 2));
    }

    #[test]
    fn scenery_is_not_solid() {
        let mut grid = TileGrid::new(5, 5, 32.0);
        grid.set(0, 0, Some(Tile::new(TileKind::Scenery)));
        assert!(grid.tile_at(0, 0).is_some());
        assert!(!grid.is_solid(0, 0));
    }

    #[test]
    fn outside_grid_is_sky() {
        let grid = TileGrid::new(5, 5, 32.0);
        assert!(grid.tile_at(-1, 0).is_none());
        assert!(grid.tile_at(0, 5).is_none());
        assert!(!grid.is_solid(99, 99));
    }

    #[test]
    fn fill_rect_clips_to_grid() {
        let mut grid = TileGrid::new(4, 4, 32.0);
        grid.fill_rect(2, 2, 5, 5, Some(Tile::new(TileKind::Ground)));
        assert_eq!(grid.tile_count(), 4);
    }

    #[test]
    fn fill_rect_with_huge_extent_saturates() {
        let mut grid = TileGrid::new(4, 4, 32.0);
        grid.fill_rect(1, 3, u32::MAX, u32::MAX, Some(Tile::new(TileKind::Ground)));
        assert_eq!(grid.tile_count(), 3);
    }

    #[test]
    fn cells_overlapping_excludes_flush_neighbours() {
        let grid = TileGrid::new(10, 10, 32.0);
        // Box resting exactly on top of row 4 must not cover row 4.
        let span = grid.cells_overlapping(&Aabb::new(0.0, 96.0, 32.0, 32.0));
        assert_eq!(span.cols, 0..1);
        assert_eq!(span.rows, 3..4);

        let span = grid.cells_overlapping(&Aabb::new(16.0, 100.0, 32.0, 32.0));
        assert_eq!(span.cols, 0..2);
        assert_eq!(span.rows, 3..5);
    }

    #[test]
    fn cell_rect_and_cell_of() {
        let grid = TileGrid::new(10, 10, 32.0);
        assert_eq!(grid.cell_rect(2, 4), Aabb::new(64.0, 128.0, 32.0, 32.0));
        assert_eq!(grid.cell_of(Vec2::new(70.0, 130.0)), (2, 4));
        assert_eq!(grid.cell_of(Vec2::new(-1.0, 0.0)), (-1, 0));
    }
}
