use crate::behaviors::Direction;
use crate::components::body::Body;
use crate::input::queue::Controls;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    Idle,
    MovingLeft,
    MovingRight,
}

/// Input-driven horizontal movement for the player: accelerate toward the
/// held direction, decelerate to a stop when nothing is held.
#[derive(Debug, Clone, PartialEq)]
pub struct Go {
    state: WalkState,
    heading: Direction,
    accel: f32,
    decel: f32,
    max_speed: f32,
    boost_max_speed: f32,
}

impl Go {
    pub fn new(accel: f32, decel: f32, max_speed: f32, boost_max_speed: f32) -> Self {
        Self {
            state: WalkState::Idle,
            heading: Direction::Right,
            accel,
            decel,
            max_speed,
            boost_max_speed,
        }
    }

    pub fn state(&self) -> WalkState {
        self.state
    }

    /// Last direction the entity moved in.
    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn update(&mut self, body: &mut Body, controls: &Controls) {
        self.state = match controls.direction() {
            Some(Direction::Left) => WalkState::MovingLeft,
            Some(Direction::Right) => WalkState::MovingRight,
            None => WalkState::Idle,
        };

        let max = if controls.boost {
            self.boost_max_speed
        } else {
            if body.vel.x.abs() > self.max_speed {
                body.vel.x = self.max_speed * self.heading.sign();
            }
            self.max_speed
        };

        match self.state {
            WalkState::MovingRight => {
                self.heading = Direction::Right;
                if body.vel.x < max {
                    body.vel.x += self.accel;
                }
            }
            WalkState::MovingLeft => {
                self.heading = Direction::Left;
                if body.vel.x > -max {
                    body.vel.x -= self.accel;
                }
            }
            WalkState::Idle => {
                if body.vel.x >= 0.0 {
                    body.vel.x -= self.decel;
                } else {
                    body.vel.x += self.decel;
                }
                if body.vel.x.trunc() == 0.0 {
                    body.vel.x = 0.0;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aabb::Aabb;

    fn body() -> Body {
        Body::new(Aabb::new(0.0, 0.0, 32.0, 32.0))
    }

    fn holding(left: bool, right: bool) -> Controls {
        Controls {
            left,
            right,
            ..Controls::default()
        }
    }

    #[test]
    fn accelerates_up_to_max() {
        let mut go = Go::new(0.4, 0.25, 3.2, 5.0);
        let mut b = body();
        for _ in 0..50 {
            go.update(&mut b, &holding(false, true));
        }
        assert_eq!(go.state(), WalkState::MovingRight);
        assert!(b.vel.x >= 3.2 && b.vel.x < 3.2 + 0.4 + 1e-4);
    }

    #[test]
    fn left_flips_heading() {
        let mut go = Go::new(0.4, 0.25, 3.2, 5.0);
        let mut b = body();
        go.update(&mut b, &holding(true, false));
        assert_eq!(go.heading(), Direction::Left);
        assert!(b.vel.x < 0.0);
    }

    #[test]
    fn idle_snaps_to_zero() {
        let mut go = Go::new(0.4, 0.25, 3.2, 5.0);
        let mut b = body();
        b.vel.x = 3.0;
        for _ in 0..20 {
            go.update(&mut b, &Controls::default());
        }
        assert_eq!(go.state(), WalkState::Idle);
        assert_eq!(b.vel.x, 0.0);
    }

    #[test]
    fn both_directions_held_is_idle() {
        let mut go = Go::new(0.4, 0.25, 3.2, 5.0);
        let mut b = body();
        go.update(&mut b, &holding(true, true));
        assert_eq!(go.state(), WalkState::Idle);
    }

    #[test]
    fn releasing_boost_clamps_speed() {
        let mut go = Go::new(0.4, 0.25, 3.2, 5.0);
        let mut b = body();
        let boosted = Controls {
            right: true,
            boost: true,
            ..Controls::default()
        };
        for _ in 0..30 {
            go.update(&mut b, &boosted);
        }
        assert!(b.vel.x > 3.2);
        go.update(&mut b, &holding(false, true));
        assert!(b.vel.x <= 3.2 + 0.4 + 1e-4);
    }
}
