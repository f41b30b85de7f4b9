use glam::Vec2;

use crate::core::aabb::Aabb;

/// Physical state shared by an entity's behaviors and the colliders.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Collision and visual bounds.
    pub rect: Aabb,
    /// Pixels per tick.
    pub vel: Vec2,
    /// Multiplier on gravity; the jump behavior lowers it while the button is held.
    pub gravity_scale: f32,
    /// Set by the tile collider when the last vertical move ended on a tile.
    pub on_ground: bool,
    /// Set by the tile collider when the last horizontal move hit a wall or level border.
    pub wall_contact: bool,
}

impl Body {
    pub fn new(rect: Aabb) -> Self {
        Self {
            rect,
            vel: Vec2::ZERO,
            gravity_scale: 1.0,
            on_ground: false,
            wall_contact: false,
        }
    }
}
