use serde::{Deserialize, Serialize};

use crate::api::sinks::{Dashboard, FeedbackLog, Sinks};
use crate::api::types::GameEvent;
use crate::bridge::snapshot::SnapshotBuffer;
use crate::components::grid::TileGrid;
use crate::core::level::Level;
use crate::core::tuning::Tuning;
use crate::error::LevelError;
use crate::input::bindings::KeyBindings;
use crate::input::queue::InputQueue;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Most ticks run for one host frame (default: 10).
    pub max_catch_up_steps: u32,
    /// Maximum number of body instances in a snapshot (default: 512).
    pub max_bodies: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    pub tuning: Tuning,
    pub keys: KeyBindings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_catch_up_steps: 10,
            max_bodies: 512,
            max_sounds: 32,
            max_events: 32,
            tuning: Tuning::default(),
            keys: KeyBindings::default(),
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state and load the first level.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed simulation tick.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Replace the current level with one described by `json`.
    fn load_level(&mut self, ctx: &mut EngineContext, json: &str) -> Result<(), LevelError>;

    /// Write everything visible into `out`. Called once per host frame.
    fn render(&self, _ctx: &EngineContext, _out: &mut SnapshotBuffer) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub level: Level,
    /// Feedback raised during the current frame.
    pub feedback: FeedbackLog,
    pub dashboard: Dashboard,
    pub events: Vec<GameEvent>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            level: Level::new(TileGrid::new(1, 1, 32.0)),
            feedback: FeedbackLog::new(),
            dashboard: Dashboard::new(),
            events: Vec::new(),
        }
    }

    /// Emit a game event to be sent to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (feedback, events).
    pub fn clear_frame_data(&mut self) {
        self.feedback.clear();
        self.events.clear();
    }

    /// Borrow the level alongside the sinks a tick writes to.
    pub fn split(&mut self) -> (&mut Level, Sinks<'_>) {
        (
            &mut self.level,
            Sinks {
                feedback: &mut self.feedback,
                score: &mut self.dashboard,
            },
        )
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Feedback;

    #[test]
    fn config_from_partial_json() {
        let config = GameConfig::from_json(
            r#"{ "max_catch_up_steps": 4, "tuning": { "shell_speed": 6.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.max_catch_up_steps, 4);
        assert_eq!(config.tuning.shell_speed, 6.0);
        assert_eq!(config.tuning.tile_size, 32.0);
        assert_eq!(config.max_sounds, 32);
    }

    #[test]
    fn clear_frame_data_keeps_score() {
        let mut ctx = EngineContext::new();
        {
            let (_, mut sinks) = ctx.split();
            sinks.feedback.notify(Feedback::Coin);
            sinks.score.add_points(100);
        }
        ctx.emit_event(GameEvent::win());
        ctx.clear_frame_data();
        assert!(ctx.feedback.is_empty());
        assert!(ctx.events.is_empty());
        assert_eq!(ctx.dashboard.points, 100);
    }
}
