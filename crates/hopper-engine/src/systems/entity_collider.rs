//! Pairwise entity overlap classification.

use glam::Vec2;

use crate::core::aabb::Aabb;

/// How one entity touches another this tick. Recomputed every tick, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionState {
    pub is_colliding: bool,
    /// The mover came down onto the target.
    pub is_top: bool,
    /// The mover came up into the target.
    pub is_bottom: bool,
    /// The mover is on the target's left.
    pub is_left: bool,
    /// The mover is on the target's right.
    pub is_right: bool,
}

impl CollisionState {
    pub fn is_side(&self) -> bool {
        self.is_left || self.is_right
    }
}

/// Classifies overlaps. Holds only the top/bottom contact tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityCollider {
    pub tolerance: f32,
}

impl EntityCollider {
    pub fn new(tolerance: f32) -> Self {
        Self { tolerance }
    }

    /// Classify `mover` against `target`.
    ///
    /// Colliding means positive overlap on both axes; touching edges and
    /// empty boxes never collide. A top contact needs the mover's bottom edge
    /// within `tolerance` of the target's top edge and the mover falling.
    /// Bottom contact is the mirror image. Any other overlap is a side
    /// contact, with the side taken from the two centers.
    pub fn check(&self, mover: &Aabb, mover_vel: Vec2, target: &Aabb) -> CollisionState {
        if !mover.intersects(target) {
            return CollisionState::default();
        }
        let depth = mover.overlap(target);
        let mut state = CollisionState {
            is_colliding: true,
            ..CollisionState::default()
        };

        let shallow = depth.y <= self.tolerance;
        if mover_vel.y > 0.0 && shallow && mover.bottom() - target.top() <= self.tolerance {
            state.is_top = true;
        } else if mover_vel.y < 0.0 && shallow && target.bottom() - mover.top() <= self.tolerance {
            state.is_bottom = true;
        } else if mover.center().x <= target.center().x {
            state.is_left = true;
        } else {
            state.is_right = true;
        }
        state
    }
}
