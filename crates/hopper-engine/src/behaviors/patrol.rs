use crate::behaviors::Direction;
use crate::components::body::Body;

/// Autonomous left/right walk for mobs. Turns around whenever the tile
/// collider reported a wall on the previous move.
#[derive(Debug, Clone, PartialEq)]
pub struct Patrol {
    pub direction: Direction,
    pub speed: f32,
}

impl Patrol {
    pub fn new(direction: Direction, speed: f32) -> Self {
        Self { direction, speed }
    }

    pub fn update(&mut self, body: &mut Body) {
        if body.wall_contact {
            self.direction = self.direction.flipped();
        }
        body.vel.x = self.speed * self.direction.sign();
    }
}
