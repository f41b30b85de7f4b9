use crate::api::sinks::FeedbackSink;
use crate::api::types::Feedback;
use crate::components::body::Body;
use crate::input::queue::Controls;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpPhase {
    Grounded,
    Ascending,
    Descending,
}

/// Variable-height jump.
///
/// Take-off sets `vel.y = -impulse`. While the button stays held, gravity is
/// suspended until the entity has risen `sustain_height` pixels or
/// `max_hold_ticks` have passed; releasing early restores full gravity, so a
/// tap gives a short hop and a hold gives the full `jump_height`.
#[derive(Debug, Clone, PartialEq)]
pub struct Jump {
    phase: JumpPhase,
    impulse: f32,
    sustain_height: f32,
    max_hold_ticks: u32,
    held_ticks: u32,
    sustaining: bool,
    start_y: f32,
}

impl Jump {
    /// `gravity` is the entity's per-tick pull; it decides how much of
    /// `jump_height` the ballistic part of the arc covers on its own.
    pub fn new(impulse: f32, jump_height: f32, gravity: f32, max_hold_ticks: u32) -> Self {
        let ballistic = impulse * impulse / (2.0 * gravity);
        Self {
            phase: JumpPhase::Grounded,
            impulse,
            sustain_height: (jump_height - ballistic).max(0.0),
            max_hold_ticks,
            held_ticks: 0,
            sustaining: false,
            start_y: 0.0,
        }
    }

    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    pub fn update(&mut self, body: &mut Body, controls: &Controls, feedback: &mut dyn FeedbackSink) {
        match self.phase {
            JumpPhase::Grounded => {
                if controls.jump_pressed && body.on_ground {
                    body.vel.y = -self.impulse;
                    body.gravity_scale = 0.0;
                    self.start_y = body.rect.top();
                    self.held_ticks = 0;
                    self.sustaining = true;
                    self.phase = JumpPhase::Ascending;
                    feedback.notify(Feedback::Jump);
                } else if !body.on_ground && body.vel.y > 0.0 {
                    // Walked off a ledge.
                    self.phase = JumpPhase::Descending;
                }
            }
            JumpPhase::Ascending => {
                self.held_ticks += 1;
                let risen = self.start_y - body.rect.top();
                if self.sustaining
                    && (!controls.jump_held
                        || risen >= self.sustain_height
                        || self.held_ticks >= self.max_hold_ticks
                        || body.vel.y >= 0.0)
                {
                    self.sustaining = false;
                    body.gravity_scale = 1.0;
                }
                if body.vel.y >= 0.0 {
                    self.phase = JumpPhase::Descending;
                }
            }
            JumpPhase::Descending => {}
        }
    }

    /// Called when the tile collider reports ground contact.
    pub fn land(&mut self, body: &mut Body) {
        self.phase = JumpPhase::Grounded;
        self.sustaining = false;
        body.gravity_scale = 1.0;
        body.vel.y = 0.0;
    }
}
