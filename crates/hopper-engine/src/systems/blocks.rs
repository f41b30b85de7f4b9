//! Question-block triggers and the bump animation.

use glam::Vec2;

use crate::api::sinks::Sinks;
use crate::api::types::Feedback;
use crate::behaviors::Direction;
use crate::components::entity::{BlockContents, BlockState, Entity, EntityKind, MobKind};
use crate::core::level::Level;
use crate::core::tuning::Tuning;

/// Trigger the block entity at `index`. The first trigger awards one coin and
/// plays the bump; a power-up block also queues a Mushroom on top of itself.
/// Later triggers are no-ops. Returns whether this call was the first.
pub fn hit_block(level: &mut Level, index: usize, tuning: &Tuning, sinks: &mut Sinks<'_>) -> bool {
    let Some(entity) = level.entities.get_mut(index) else {
        return false;
    };
    let above = entity.body.rect.pos() - Vec2::new(0.0, tuning.tile_size);
    let EntityKind::Block(state) = &mut entity.kind else {
        return false;
    };
    if !state.trigger() {
        return false;
    }
    let contents = state.contents;

    sinks.score.add_currency(1);
    sinks.feedback.notify(Feedback::Bump);

    if contents == BlockContents::PowerUp {
        let id = level.spawner.next_id();
        let mut mushroom = Entity::mob(id, MobKind::Mushroom, above, tuning);
        if let Some(patrol) = mushroom.behaviors.patrol_mut() {
            patrol.direction = Direction::Right;
        }
        level.spawner.queue(mushroom);
        sinks.feedback.notify(Feedback::PowerUpAppear);
        log::debug!("power-up spawned at ({}, {})", above.x, above.y);
    }
    true
}

/// Advance the bump animation of every triggered block.
pub fn update_blocks(level: &mut Level, tuning: &Tuning) {
    let total = tuning.block_bump_ticks * 2;
    for entity in &mut level.entities {
        if let EntityKind::Block(state) = &mut entity.kind {
            if state.triggered() && state.bump_ticks < total {
                state.bump_ticks += 1;
            }
        }
    }
}

/// Vertical draw offset of a bumping block: rises one pixel per tick, then
/// falls back. The collision box never moves.
pub fn bump_offset(state: &BlockState, tuning: &Tuning) -> f32 {
    let rise = tuning.block_bump_ticks;
    let t = state.bump_ticks;
    if !state.triggered() || t >= rise * 2 {
        return 0.0;
    }
    let up = if t <= rise { t } else { rise * 2 - t };
    -(up as f32)
}
