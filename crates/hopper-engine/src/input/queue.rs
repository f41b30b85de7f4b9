use crate::behaviors::Direction;

/// Logical actions the platformer understands. Key codes are mapped onto
/// these by [`KeyBindings`](crate::input::bindings::KeyBindings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Boost,
    Pause,
    Restart,
}

/// Input event types the engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Action),
    Released(Action),
}

/// A queue of input events.
/// JS writes events into the queue; the game reads them once per tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether `action` was pressed since the queue was last cleared.
    pub fn was_pressed(&self, action: Action) -> bool {
        self.events.contains(&InputEvent::Pressed(action))
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Held-button state sampled by the player's behaviors each tick.
///
/// `jump_pressed` is an edge: true only on the tick the jump button went
/// down. Key repeat (a second `Pressed(Jump)` while held) does not re-arm it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump_held: bool,
    pub jump_pressed: bool,
    pub boost: bool,
}

impl Controls {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(Action::MoveLeft) => self.left = true,
            InputEvent::Released(Action::MoveLeft) => self.left = false,
            InputEvent::Pressed(Action::MoveRight) => self.right = true,
            InputEvent::Released(Action::MoveRight) => self.right = false,
            InputEvent::Pressed(Action::Jump) => {
                if !self.jump_held {
                    self.jump_pressed = true;
                }
                self.jump_held = true;
            }
            InputEvent::Released(Action::Jump) => self.jump_held = false,
            InputEvent::Pressed(Action::Boost) => self.boost = true,
            InputEvent::Released(Action::Boost) => self.boost = false,
            // Pause and restart are handled by the game, not the player.
            InputEvent::Pressed(_) | InputEvent::Released(_) => {}
        }
    }

    pub fn apply_all(&mut self, queue: &InputQueue) {
        for event in queue.iter() {
            self.apply(*event);
        }
    }

    /// Held horizontal direction. Both or neither held means no direction.
    pub fn direction(&self) -> Option<Direction> {
        match (self.left, self.right) {
            (true, false) => Some(Direction::Left),
            (false, true) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Clear the per-tick edges.
    pub fn end_tick(&mut self) {
        self.jump_pressed = false;
    }

    /// Release everything (restart, focus loss).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Pressed(Action::Jump));
        q.push(InputEvent::Released(Action::Jump));
        assert_eq!(q.len(), 2);
        assert!(q.was_pressed(Action::Jump));
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn jump_press_is_an_edge() {
        let mut c = Controls::default();
        c.apply(InputEvent::Pressed(Action::Jump));
        assert!(c.jump_pressed && c.jump_held);
        c.end_tick();
        // Key repeat while held does not re-trigger.
        c.apply(InputEvent::Pressed(Action::Jump));
        assert!(!c.jump_pressed);
        assert!(c.jump_held);
        c.apply(InputEvent::Released(Action::Jump));
        c.apply(InputEvent::Pressed(Action::Jump));
        assert!(c.jump_pressed);
    }

    #[test]
    fn opposing_directions_cancel() {
        let mut c = Controls::default();
        c.apply(InputEvent::Pressed(Action::MoveLeft));
        assert_eq!(c.direction(), Some(Direction::Left));
        c.apply(InputEvent::Pressed(Action::MoveRight));
        assert_eq!(c.direction(), None);
        c.apply(InputEvent::Released(Action::MoveLeft));
        assert_eq!(c.direction(), Some(Direction::Right));
    }

    #[test]
    fn pause_does_not_touch_controls() {
        let mut c = Controls::default();
        c.apply(InputEvent::Pressed(Action::Pause));
        assert_eq!(c, Controls::default());
    }
}
