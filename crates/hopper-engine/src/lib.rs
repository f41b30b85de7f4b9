pub mod api;
pub mod assets;
pub mod behaviors;
pub mod bridge;
pub mod components;
pub mod core;
pub mod error;
pub mod input;
pub mod platformer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::sinks::{Dashboard, FeedbackLog, FeedbackSink, ScoreSink, Sinks};
pub use api::types::{EntityId, Feedback, GameEvent, SoundEvent};
pub use assets::level_file::{LevelDescriptor, DEFAULT_LEVEL};
pub use assets::manifest::AssetManifest;
pub use assets::registry::SoundRegistry;
pub use behaviors::{Behavior, Behaviors, Direction};
pub use bridge::protocol::ProtocolLayout;
pub use bridge::snapshot::{BodyInstance, SnapshotBuffer};
pub use components::entity::{Entity, EntityCategory, EntityKind, MobKind};
pub use components::grid::{Tile, TileGrid, TileKind};
pub use components::player::{Player, PlayerState, PowerTier};
pub use core::aabb::Aabb;
pub use core::level::Level;
pub use core::time::FrameClock;
pub use core::tuning::Tuning;
pub use error::LevelError;
pub use input::bindings::KeyBindings;
pub use input::queue::{Action, Controls, InputEvent, InputQueue};
pub use platformer::Platformer;
pub use systems::entity_collider::{CollisionState, EntityCollider};
