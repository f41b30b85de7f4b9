use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::behaviors::{Behavior, Behaviors, Bounce, Direction, Go, Gravity, Jump, Patrol};
use crate::components::body::Body;
use crate::core::aabb::Aabb;
use crate::core::tuning::Tuning;

/// Coarse entity tag the player's collision response dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityCategory {
    Player,
    Mob,
    Item,
    Block,
    Decoration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobKind {
    Goomba,
    /// Shell-type: a stomp sends it into a dormant shell instead of killing it.
    Koopa,
    /// Power-up: touching it while alive grows the player.
    Mushroom,
}

impl MobKind {
    pub fn is_shell(self) -> bool {
        matches!(self, MobKind::Koopa)
    }

    pub fn is_power_up(self) -> bool {
        matches!(self, MobKind::Mushroom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockContents {
    Coin,
    PowerUp,
}

/// One-shot block state. `triggered` goes false -> true once and never back.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockState {
    pub contents: BlockContents,
    triggered: bool,
    /// Ticks elapsed in the bump animation after the trigger.
    pub bump_ticks: u32,
}

impl BlockState {
    pub fn new(contents: BlockContents) -> Self {
        Self {
            contents,
            triggered: false,
            bump_ticks: 0,
        }
    }

    pub fn triggered(&self) -> bool {
        self.triggered
    }

    /// Flip the trigger. Returns true only for the first call.
    pub fn trigger(&mut self) -> bool {
        if self.triggered {
            return false;
        }
        self.triggered = true;
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Player,
    Mob(MobKind),
    /// Collectable coin.
    Item,
    Block(BlockState),
    /// Level goal; touching it wins.
    Decoration,
}

impl EntityKind {
    pub fn category(&self) -> EntityCategory {
        match self {
            EntityKind::Player => EntityCategory::Player,
            EntityKind::Mob(_) => EntityCategory::Mob,
            EntityKind::Item => EntityCategory::Item,
            EntityKind::Block(_) => EntityCategory::Block,
            EntityKind::Decoration => EntityCategory::Decoration,
        }
    }
}

/// Fat Entity: one struct for every kind, with behaviors attached as data.
///
/// `alive == false` is a soft delete (the death animation still runs);
/// `despawn` marks the entity for removal at the end-of-tick compaction.
/// `active` is only ever true while `alive` is.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub body: Body,
    pub behaviors: Behaviors,
    pub alive: bool,
    /// Engaged and walking. A Koopa shell is alive but not active.
    pub active: bool,
    /// A kicked shell sliding along the ground.
    pub bouncing: bool,
    /// General-purpose countdown (death animation, shell sleep).
    pub timer: u32,
    pub despawn: bool,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, rect: Aabb) -> Self {
        Self {
            id,
            kind,
            body: Body::new(rect),
            behaviors: Behaviors::new(),
            alive: true,
            active: true,
            bouncing: false,
            timer: 0,
            despawn: false,
        }
    }

    // -- Builder pattern --

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    // -- Spawning --

    pub fn player(id: EntityId, pos: Vec2, tuning: &Tuning) -> Self {
        let size = tuning.tile_size;
        Entity::new(id, EntityKind::Player, Aabb::from_pos_size(pos, Vec2::splat(size)))
            .with_behavior(Behavior::Gravity(Gravity::new(
                tuning.player_gravity,
                tuning.terminal_velocity,
            )))
            .with_behavior(Behavior::Jump(Jump::new(
                tuning.jump_impulse,
                tuning.jump_height,
                tuning.player_gravity,
                tuning.jump_max_hold_ticks,
            )))
            .with_behavior(Behavior::Go(Go::new(
                tuning.walk_accel,
                tuning.walk_decel,
                tuning.walk_max_speed,
                tuning.boost_max_speed,
            )))
            .with_behavior(Behavior::Bounce(Bounce::new(tuning.bounce_impulse)))
    }

    pub fn mob(id: EntityId, kind: MobKind, pos: Vec2, tuning: &Tuning) -> Self {
        let size = tuning.tile_size;
        Entity::new(id, EntityKind::Mob(kind), Aabb::from_pos_size(pos, Vec2::splat(size)))
            .with_behavior(Behavior::Gravity(Gravity::new(
                tuning.mob_gravity,
                tuning.terminal_velocity,
            )))
            .with_behavior(Behavior::Patrol(Patrol::new(Direction::Left, tuning.patrol_speed)))
    }

    pub fn coin(id: EntityId, pos: Vec2, tuning: &Tuning) -> Self {
        Entity::new(id, EntityKind::Item, square(pos, tuning))
    }

    pub fn block(id: EntityId, contents: BlockContents, pos: Vec2, tuning: &Tuning) -> Self {
        Entity::new(id, EntityKind::Block(BlockState::new(contents)), square(pos, tuning))
    }

    pub fn goal(id: EntityId, pos: Vec2, tuning: &Tuning) -> Self {
        Entity::new(id, EntityKind::Decoration, square(pos, tuning))
    }

    // -- Queries --

    pub fn category(&self) -> EntityCategory {
        self.kind.category()
    }

    pub fn mob_kind(&self) -> Option<MobKind> {
        match self.kind {
            EntityKind::Mob(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn block_state(&self) -> Option<&BlockState> {
        match &self.kind {
            EntityKind::Block(state) => Some(state),
            _ => None,
        }
    }

    /// Alive, not engaged, not sliding: a sleeping shell.
    pub fn is_dormant(&self) -> bool {
        self.alive && !self.active && !self.bouncing
    }

    // -- State transitions --

    /// Soft delete. Idempotent.
    pub fn kill(&mut self) {
        self.alive = false;
        self.active = false;
        self.bouncing = false;
    }

    /// Retreat into a dormant shell with a fresh sleep timer.
    pub fn enter_shell(&mut self, patrol_speed: f32) {
        self.alive = true;
        self.active = false;
        self.bouncing = false;
        self.timer = 0;
        if let Some(patrol) = self.behaviors.patrol_mut() {
            patrol.speed = patrol_speed;
        }
    }
}

fn square(pos: Vec2, tuning: &Tuning) -> Aabb {
    Aabb::from_pos_size(pos, Vec2::splat(tuning.tile_size))
}
