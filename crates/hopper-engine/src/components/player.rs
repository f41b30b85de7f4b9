use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::core::aabb::Aabb;
use crate::core::tuning::Tuning;

/// Power-up tier. Damage at `Base` is fatal; damage at `Powered` drops to `Base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PowerTier {
    Base,
    Powered,
}

impl PowerTier {
    pub fn level(self) -> u8 {
        match self {
            PowerTier::Base => 0,
            PowerTier::Powered => 1,
        }
    }
}

/// Terminal transitions are states of the player, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Playing,
    Dead,
    Won,
}

/// The player-controlled character. Lives outside the level's entity list.
#[derive(Debug, Clone)]
pub struct Player {
    pub entity: Entity,
    pub power: PowerTier,
    /// Damage is ignored while this is non-zero. Counts down once per tick.
    pub invincibility: u32,
    /// Cosmetic "happy" countdown after a pickup.
    pub happy_ticks: u32,
    pub state: PlayerState,
}

impl Player {
    pub fn new(id: EntityId, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            entity: Entity::player(id, pos, tuning),
            power: PowerTier::Base,
            invincibility: 0,
            happy_ticks: 0,
            state: PlayerState::Playing,
        }
    }

    pub fn rect(&self) -> &Aabb {
        &self.entity.body.rect
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayerState::Playing
    }

    pub fn is_happy(&self) -> bool {
        self.happy_ticks > 0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility > 0
    }

    /// Base -> Powered. The box doubles in height, keeping the feet in place.
    /// Returns false (and changes nothing) when already powered.
    pub fn grow(&mut self, tuning: &Tuning) -> bool {
        if self.power != PowerTier::Base {
            return false;
        }
        self.power = PowerTier::Powered;
        self.resize(tuning.tile_size * 2.0, tuning);
        self.invincibility = tuning.power_up_invincibility_ticks;
        true
    }

    /// Powered -> Base with an invincibility grace window.
    /// Returns false when already at base tier.
    pub fn shrink(&mut self, tuning: &Tuning) -> bool {
        if self.power == PowerTier::Base {
            return false;
        }
        self.power = PowerTier::Base;
        self.resize(tuning.tile_size, tuning);
        self.invincibility = tuning.shrink_invincibility_ticks;
        true
    }

    fn resize(&mut self, height: f32, tuning: &Tuning) {
        let old = self.entity.body.rect;
        self.entity.body.rect = Aabb::new(old.left(), old.bottom() - height, tuning.tile_size, height);
    }
}
