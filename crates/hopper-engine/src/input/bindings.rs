use serde::{Deserialize, Serialize};

use crate::input::queue::Action;

/// Browser `keyCode` values bound to each action. Several keys may share one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left: Vec<u32>,
    pub right: Vec<u32>,
    pub jump: Vec<u32>,
    pub boost: Vec<u32>,
    pub pause: Vec<u32>,
    pub restart: Vec<u32>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            // Arrow keys and A/D/W.
            left: vec![37, 65],
            right: vec![39, 68],
            jump: vec![38, 87, 32],
            boost: vec![16],
            pause: vec![27],
            restart: vec![82, 13],
        }
    }
}

impl KeyBindings {
    pub fn action_for(&self, key_code: u32) -> Option<Action> {
        let table = [
            (&self.left, Action::MoveLeft),
            (&self.right, Action::MoveRight),
            (&self.jump, Action::Jump),
            (&self.boost, Action::Boost),
            (&self.pause, Action::Pause),
            (&self.restart, Action::Restart),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.contains(&key_code))
            .map(|(_, action)| action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_arrow_keys() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action_for(37), Some(Action::MoveLeft));
        assert_eq!(keys.action_for(39), Some(Action::MoveRight));
        assert_eq!(keys.action_for(32), Some(Action::Jump));
        assert_eq!(keys.action_for(999), None);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let keys: KeyBindings = serde_json::from_str(r#"{ "jump": [90] }"#).unwrap();
        assert_eq!(keys.action_for(90), Some(Action::Jump));
        assert_eq!(keys.action_for(32), None);
        assert_eq!(keys.action_for(16), Some(Action::Boost));
    }
}
