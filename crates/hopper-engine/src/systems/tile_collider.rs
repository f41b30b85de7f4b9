//! Per-axis movement resolution against the static tile grid.
//!
//! Movement is resolved one axis at a time, Y before X. Each axis moves the
//! body by its velocity, then looks at every solid tile in the swept region
//! and pushes the body flush against the first one met in the direction of
//! travel. Flush means touching, and touching is not overlapping, so a body
//! resting on the ground never snags on the X pass.

use crate::components::body::Body;
use crate::components::grid::TileGrid;
use crate::core::aabb::Aabb;

/// Slack for tiles the body already sits flush against before moving.
const EPS: f32 = 1e-3;

/// Outcome of a Y-axis move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerticalContact {
    /// Downward move stopped by a tile.
    pub landed: bool,
    /// Cell the body's head struck while moving up. The caller decides what a
    /// struck block does; the collider only reports it.
    pub head_hit: Option<(i32, i32)>,
    /// The body's top passed the bottom of the level.
    pub fell_out: bool,
}

/// Outcome of an X-axis move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HorizontalContact {
    /// Stopped by a tile or by a level border.
    pub blocked: bool,
    /// Stopped by a level border specifically.
    pub border: bool,
}

/// Solid cells covered by `swept`, as (col, row, cell box).
fn solid_cells<'g>(grid: &'g TileGrid, swept: &Aabb) -> impl Iterator<Item = (i32, i32, Aabb)> + 'g {
    let span = grid.cells_overlapping(swept);
    span.rows
        .flat_map(move |row| span.cols.clone().map(move |col| (col, row)))
        .filter(move |&(col, row)| grid.is_solid(col, row))
        .map(move |(col, row)| (col, row, grid.cell_rect(col, row)))
}

/// Apply `vel.y` and resolve against the grid.
pub fn check_y(body: &mut Body, grid: &TileGrid) -> VerticalContact {
    let mut contact = VerticalContact::default();
    let dy = body.vel.y;
    let before = body.rect;
    body.on_ground = false;

    if dy == 0.0 {
        // Resting: probe one pixel down so standing still still counts as grounded.
        let mut probe = before;
        probe.translate(glam::Vec2::new(0.0, 1.0));
        body.on_ground = solid_cells(grid, &probe).any(|(_, _, cell)| cell.top() >= before.bottom() - EPS);
        return contact;
    }

    body.rect.translate(glam::Vec2::new(0.0, dy));
    if body.rect.top() >= grid.pixel_height() {
        contact.fell_out = true;
        return contact;
    }

    let swept = before.union(&body.rect);
    if dy > 0.0 {
        let floor = solid_cells(grid, &swept)
            .map(|(_, _, cell)| cell.top())
            .filter(|&top| top >= before.bottom() - EPS)
            .fold(f32::INFINITY, f32::min);
        if floor.is_finite() {
            body.rect.set_bottom(floor);
            body.vel.y = 0.0;
            body.on_ground = true;
            contact.landed = true;
        }
    } else {
        let mut ceiling: Option<(f32, i32, i32, f32)> = None;
        for (col, row, cell) in solid_cells(grid, &swept) {
            if cell.bottom() > before.top() + EPS {
                continue;
            }
            let reach = body.rect.right().min(cell.right()) - body.rect.left().max(cell.left());
            let better = match ceiling {
                None => true,
                Some((bottom, _, _, best)) => {
                    cell.bottom() > bottom || (cell.bottom() == bottom && reach > best)
                }
            };
            if better {
                ceiling = Some((cell.bottom(), col, row, reach));
            }
        }
        if let Some((bottom, col, row, _)) = ceiling {
            body.rect.set_top(bottom);
            body.vel.y = 0.0;
            contact.head_hit = Some((col, row));
        }
    }
    contact
}

/// Apply `vel.x` and resolve against the grid, then the level borders.
///
/// The border clamp runs last and only ever pulls the body back over ground
/// the tile pass already swept, so it cannot push it into a tile.
pub fn check_x(body: &mut Body, grid: &TileGrid) -> HorizontalContact {
    let mut contact = HorizontalContact::default();
    let dx = body.vel.x;
    let before = body.rect;
    body.wall_contact = false;
    body.rect.translate(glam::Vec2::new(dx, 0.0));

    if dx != 0.0 {
        let swept = before.union(&body.rect);
        let wall = if dx > 0.0 {
            solid_cells(grid, &swept)
                .map(|(_, _, cell)| cell.left())
                .filter(|&left| left >= before.right() - EPS)
                .fold(f32::INFINITY, f32::min)
        } else {
            solid_cells(grid, &swept)
                .map(|(_, _, cell)| cell.right())
                .filter(|&right| right <= before.left() + EPS)
                .fold(f32::NEG_INFINITY, f32::max)
        };
        if wall.is_finite() {
            if dx > 0.0 {
                body.rect.set_right(wall);
            } else {
                body.rect.set_left(wall);
            }
            body.vel.x = 0.0;
            body.wall_contact = true;
            contact.blocked = true;
        }
    }

    // Last column, or further left for bodies wider than a tile.
    let max_left = (grid.width.saturating_sub(1) as f32 * grid.tile_size)
        .min(grid.pixel_width() - body.rect.width())
        .max(0.0);
    if body.rect.left() < 0.0 || body.rect.left() > max_left {
        body.rect.set_left(body.rect.left().clamp(0.0, max_left));
        body.vel.x = 0.0;
        body.wall_contact = true;
        contact.blocked = true;
        contact.border = true;
    }
    contact
}

/// Full move for one tick: Y first, then X. X is skipped once the body has
/// left the level.
pub fn move_body(body: &mut Body, grid: &TileGrid) -> (VerticalContact, HorizontalContact) {
    let vertical = check_y(body, grid);
    if vertical.fell_out {
        return (vertical, HorizontalContact::default());
    }
    let horizontal = check_x(body, grid);
    (vertical, horizontal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::grid::{Tile, TileKind};
    use glam::Vec2;

    /// 20x10 grid with a ground row at row 4 (y = 128..160).
    fn ground_grid() -> TileGrid {
        let mut grid = TileGrid::new(20, 10, 32.0);
        grid.fill_rect(0, 4, 20, 1, Some(Tile::new(TileKind::Ground)));
        grid
    }

    fn overlaps_solid(body: &Body, grid: &TileGrid) -> bool {
        solid_cells(grid, &body.rect).any(|(_, _, cell)| cell.intersects(&body.rect))
    }

    #[test]
    fn lands_flush_on_ground() {
        let grid = ground_grid();
        let mut body = Body::new(Aabb::new(0.0, 100.0, 32.0, 32.0));
        body.vel.y = 5.0;
        let contact = check_y(&mut body, &grid);
        assert!(contact.landed);
        assert_eq!(body.rect.top(), 96.0);
        assert_eq!(body.rect.bottom(), 128.0);
        assert_eq!(body.vel.y, 0.0);
        assert!(body.on_ground);
    }

    #[test]
    fn lands_when_starting_above_the_tile_row() {
        let grid = ground_grid();
        // Bottom at 100, moving 5 -> no contact yet.
        let mut body = Body::new(Aabb::new(0.0, 68.0, 32.0, 32.0));
        body.vel.y = 5.0;
        let contact = check_y(&mut body, &grid);
        assert!(!contact.landed);
        assert_eq!(body.rect.top(), 73.0);
        assert_eq!(body.vel.y, 5.0);
    }

    #[test]
    fn scenario_tile_covering_128_to_160() {
        // Same fall with the ground one row lower: the box comes to rest at y = 128.
        let mut grid = TileGrid::new(20, 10, 32.0);
        grid.fill_rect(0, 5, 20, 1, Some(Tile::new(TileKind::Ground)));
        let mut body = Body::new(Aabb::new(0.0, 100.0, 32.0, 32.0));
        body.vel.y = 5.0;
        for _ in 0..10 {
            check_y(&mut body, &grid);
        }
        assert_eq!(body.rect.top(), 128.0);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn resting_body_stays_grounded() {
        let grid = ground_grid();
        let mut body = Body::new(Aabb::new(0.0, 96.0, 32.0, 32.0));
        let contact = check_y(&mut body, &grid);
        assert!(!contact.landed);
        assert!(body.on_ground);
        assert_eq!(body.rect.top(), 96.0);
    }

    #[test]
    fn head_hit_reports_cell_with_most_overlap() {
        let mut grid = TileGrid::new(20, 10, 32.0);
        grid.set(2, 2, Some(Tile::new(TileKind::CoinBlock)));
        grid.set(3, 2, Some(Tile::new(TileKind::Brick)));
        // Spans columns 2 (10 px) and 3 (22 px).
        let mut body = Body::new(Aabb::new(86.0, 100.0, 32.0, 32.0));
        body.vel.y = -10.0;
        let contact = check_y(&mut body, &grid);
        assert_eq!(contact.head_hit, Some((3, 2)));
        assert_eq!(body.rect.top(), 96.0);
        assert_eq!(body.vel.y, 0.0);
        assert!(!body.on_ground);
    }

    #[test]
    fn tall_body_checks_every_spanned_row() {
        let mut grid = TileGrid::new(20, 10, 32.0);
        // Wall tile only at the body's feet level (row 3).
        grid.set(3, 3, Some(Tile::new(TileKind::Pipe)));
        let mut body = Body::new(Aabb::new(60.0, 64.0, 32.0, 64.0));
        body.vel.x = 6.0;
        let contact = check_x(&mut body, &grid);
        assert!(contact.blocked);
        assert_eq!(body.rect.right(), 96.0);
        assert_eq!(body.vel.x, 0.0);
        assert!(body.wall_contact);
    }

    #[test]
    fn walking_on_ground_does_not_catch_floor() {
        let grid = ground_grid();
        let mut body = Body::new(Aabb::new(0.0, 96.0, 32.0, 32.0));
        body.vel = Vec2::new(3.0, 0.8);
        move_body(&mut body, &grid);
        assert_eq!(body.rect.left(), 3.0);
        assert_eq!(body.rect.bottom(), 128.0);
        assert!(!body.wall_contact);
    }

    #[test]
    fn left_wall_clamps_flush() {
        let mut grid = TileGrid::new(20, 10, 32.0);
        grid.set(1, 2, Some(Tile::new(TileKind::Pipe)));
        let mut body = Body::new(Aabb::new(66.0, 64.0, 32.0, 32.0));
        body.vel.x = -4.0;
        check_x(&mut body, &grid);
        assert_eq!(body.rect.left(), 64.0);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn level_borders_clamp() {
        let grid = TileGrid::new(10, 10, 32.0);
        let mut body = Body::new(Aabb::new(1.0, 0.0, 32.0, 32.0));
        body.vel.x = -3.0;
        let contact = check_x(&mut body, &grid);
        assert!(contact.border);
        assert_eq!(body.rect.left(), 0.0);

        let mut body = Body::new(Aabb::new(286.0, 0.0, 32.0, 32.0));
        body.vel.x = 3.0;
        let contact = check_x(&mut body, &grid);
        assert!(contact.border);
        assert_eq!(body.rect.left(), 288.0);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn fast_move_stops_at_tile_before_border() {
        let mut grid = TileGrid::new(10, 10, 32.0);
        grid.set(9, 2, Some(Tile::new(TileKind::Pipe)));
        let mut body = Body::new(Aabb::new(250.0, 64.0, 32.0, 32.0));
        body.vel.x = 60.0;
        let contact = check_x(&mut body, &grid);
        assert!(contact.blocked);
        assert!(!contact.border);
        assert_eq!(body.rect.right(), 288.0);
        assert!(!overlaps_solid(&body, &grid));
    }

    #[test]
    fn wide_body_stays_inside_right_border() {
        let grid = TileGrid::new(10, 10, 32.0);
        let mut body = Body::new(Aabb::new(250.0, 0.0, 64.0, 32.0));
        body.vel.x = 12.0;
        let contact = check_x(&mut body, &grid);
        assert!(contact.border);
        assert_eq!(body.rect.right(), grid.pixel_width());
    }

    #[test]
    fn falling_out_is_reported_not_resolved() {
        let grid = TileGrid::new(10, 4, 32.0);
        let mut body = Body::new(Aabb::new(0.0, 120.0, 32.0, 32.0));
        body.vel.y = 10.0;
        let (vertical, horizontal) = move_body(&mut body, &grid);
        assert!(vertical.fell_out);
        assert_eq!(horizontal, HorizontalContact::default());
    }

    #[test]
    fn no_overlap_after_any_single_axis_move() {
        let mut grid = ground_grid();
        grid.fill_rect(6, 1, 2, 3, Some(Tile::new(TileKind::Pipe)));
        for start_x in [150.0, 160.0, 170.0, 250.0, 260.0] {
            for vx in [-12.0, -5.0, -0.5, 0.5, 5.0, 12.0] {
                for vy in [-12.0, -3.0, 0.0, 3.0, 12.0] {
                    let mut body = Body::new(Aabb::new(start_x, 64.0, 32.0, 32.0));
                    if overlaps_solid(&body, &grid) {
                        continue;
                    }
                    body.vel = Vec2::new(vx, vy);
                    check_y(&mut body, &grid);
                    assert!(!overlaps_solid(&body, &grid), "y: x={start_x} v=({vx},{vy})");
                    check_x(&mut body, &grid);
                    assert!(!overlaps_solid(&body, &grid), "x: x={start_x} v=({vx},{vy})");
                }
            }
        }
    }
}
