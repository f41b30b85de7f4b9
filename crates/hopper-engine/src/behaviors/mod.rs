//! Per-entity behavior units.
//!
//! An entity carries a small ordered list of [`Behavior`] variants. Every tick
//! the list runs front to back; the list is kept sorted by [`Phase`] so
//! physics runs before movement and movement before reactive behaviors.
//! Behaviors only talk to each other through the shared [`Body`].

pub mod bounce;
pub mod go;
pub mod gravity;
pub mod jump;
pub mod patrol;

use serde::{Deserialize, Serialize};

use crate::api::sinks::FeedbackSink;
use crate::components::body::Body;
use crate::input::queue::Controls;

pub use bounce::Bounce;
pub use go::{Go, WalkState};
pub use gravity::Gravity;
pub use jump::{Jump, JumpPhase};
pub use patrol::Patrol;

/// Horizontal facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Execution band. Lower phases run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    Physics,
    Movement,
    Reactive,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    Gravity(Gravity),
    Jump(Jump),
    Go(Go),
    Patrol(Patrol),
    Bounce(Bounce),
}

impl Behavior {
    pub fn phase(&self) -> Phase {
        match self {
            Behavior::Gravity(_) => Phase::Physics,
            Behavior::Jump(_) | Behavior::Go(_) | Behavior::Patrol(_) => Phase::Movement,
            Behavior::Bounce(_) => Phase::Reactive,
        }
    }

    fn update(&mut self, body: &mut Body, controls: &Controls, feedback: &mut dyn FeedbackSink) {
        match self {
            Behavior::Gravity(g) => g.update(body),
            Behavior::Jump(j) => j.update(body, controls, feedback),
            Behavior::Go(g) => g.update(body, controls),
            Behavior::Patrol(p) => p.update(body),
            Behavior::Bounce(b) => b.update(body),
        }
    }
}

/// Ordered behavior list owned by one entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Behaviors {
    list: Vec<Behavior>,
}

impl Behaviors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a behavior after every behavior of the same or earlier phase.
    pub fn with(mut self, behavior: Behavior) -> Self {
        self.push(behavior);
        self
    }

    pub fn push(&mut self, behavior: Behavior) {
        let phase = behavior.phase();
        let at = self
            .list
            .iter()
            .position(|b| b.phase() > phase)
            .unwrap_or(self.list.len());
        self.list.insert(at, behavior);
    }

    /// Run every behavior once, in phase order.
    pub fn update(&mut self, body: &mut Body, controls: &Controls, feedback: &mut dyn FeedbackSink) {
        for behavior in &mut self.list {
            behavior.update(body, controls, feedback);
        }
    }

    /// Ground contact from the tile collider.
    pub fn land(&mut self, body: &mut Body) {
        for behavior in &mut self.list {
            if let Behavior::Jump(j) = behavior {
                j.land(body);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Behavior> {
        self.list.iter()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn jump(&self) -> Option<&Jump> {
        self.list.iter().find_map(|b| match b {
            Behavior::Jump(j) => Some(j),
            _ => None,
        })
    }

    pub fn go(&self) -> Option<&Go> {
        self.list.iter().find_map(|b| match b {
            Behavior::Go(g) => Some(g),
            _ => None,
        })
    }

    pub fn patrol(&self) -> Option<&Patrol> {
        self.list.iter().find_map(|b| match b {
            Behavior::Patrol(p) => Some(p),
            _ => None,
        })
    }

    pub fn patrol_mut(&mut self) -> Option<&mut Patrol> {
        self.list.iter_mut().find_map(|b| match b {
            Behavior::Patrol(p) => Some(p),
            _ => None,
        })
    }

    pub fn bounce(&self) -> Option<&Bounce> {
        self.list.iter().find_map(|b| match b {
            Behavior::Bounce(bounce) => Some(bounce),
            _ => None,
        })
    }

    /// Arm the bounce behavior. Returns false if the entity has none.
    pub fn request_bounce(&mut self) -> bool {
        for behavior in &mut self.list {
            if let Behavior::Bounce(b) = behavior {
                b.trigger();
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::sinks::FeedbackLog;
    use crate::core::aabb::Aabb;

    #[test]
    fn push_keeps_phase_order() {
        let behaviors = Behaviors::new()
            .with(Behavior::Bounce(Bounce::new(5.0)))
            .with(Behavior::Patrol(Patrol::new(Direction::Left, 1.0)))
            .with(Behavior::Gravity(Gravity::new(1.25, 12.0)));
        let phases: Vec<Phase> = behaviors.iter().map(Behavior::phase).collect();
        assert_eq!(phases, vec![Phase::Physics, Phase::Movement, Phase::Reactive]);
    }

    #[test]
    fn same_phase_keeps_insertion_order() {
        let behaviors = Behaviors::new()
            .with(Behavior::Jump(Jump::new(12.0, 120.0, 0.8, 12)))
            .with(Behavior::Go(Go::new(0.4, 0.25, 3.2, 5.0)));
        let kinds: Vec<bool> = behaviors
            .iter()
            .map(|b| matches!(b, Behavior::Jump(_)))
            .collect();
        assert_eq!(kinds, vec![true, false]);
    }

    #[test]
    fn bounce_overrides_gravity_in_same_tick() {
        let mut behaviors = Behaviors::new()
            .with(Behavior::Bounce(Bounce::new(5.0)))
            .with(Behavior::Gravity(Gravity::new(0.8, 12.0)));
        let mut body = Body::new(Aabb::new(0.0, 0.0, 32.0, 32.0));
        body.vel.y = 4.0;
        assert!(behaviors.request_bounce());
        behaviors.update(&mut body, &Controls::default(), &mut FeedbackLog::new());
        assert_eq!(body.vel.y, -5.0);
    }

    #[test]
    fn request_bounce_without_bounce_behavior() {
        let mut behaviors = Behaviors::new().with(Behavior::Gravity(Gravity::new(0.8, 12.0)));
        assert!(!behaviors.request_bounce());
    }

    #[test]
    fn direction_helpers() {
        assert_eq!(Direction::Left.sign(), -1.0);
        assert_eq!(Direction::Left.flipped(), Direction::Right);
    }
}
