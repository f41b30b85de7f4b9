use crate::components::body::Body;

/// One-shot upward kick applied after a stomp, independent of the jump state.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounce {
    impulse: f32,
    pending: bool,
}

impl Bounce {
    pub fn new(impulse: f32) -> Self {
        Self {
            impulse,
            pending: false,
        }
    }

    /// Arm the bounce; it fires on the next update and then clears itself.
    pub fn trigger(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn update(&mut self, body: &mut Body) {
        if self.pending {
            body.vel.y = -self.impulse;
            self.pending = false;
        }
    }
}
