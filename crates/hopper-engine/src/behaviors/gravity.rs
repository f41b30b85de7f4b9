use crate::components::body::Body;

/// Pulls `vel.y` toward terminal velocity every tick.
///
/// The pull is scaled by `body.gravity_scale`, which the jump behavior lowers
/// while the jump button is held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    pub strength: f32,
    pub terminal_velocity: f32,
}

impl Gravity {
    pub fn new(strength: f32, terminal_velocity: f32) -> Self {
        Self {
            strength,
            terminal_velocity,
        }
    }

    pub fn update(&self, body: &mut Body) {
        let vy = body.vel.y + self.strength * body.gravity_scale;
        body.vel.y = vy.min(self.terminal_velocity);
    }
}
