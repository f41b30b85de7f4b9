//! Autonomous mob ticks: walking, Koopa shell sub-states, death countdowns.

use glam::Vec2;

use crate::api::sinks::Sinks;
use crate::api::types::Feedback;
use crate::components::entity::{Entity, MobKind};
use crate::components::grid::TileGrid;
use crate::core::aabb::Aabb;
use crate::core::level::Level;
use crate::core::tuning::Tuning;
use crate::input::queue::Controls;
use crate::systems::tile_collider::move_body;

/// Tick every mob within activation range of `focus` (the player's center).
///
/// A kicked shell kills any other live mob it overlaps. Shell positions are
/// sampled once at the start of the pass, so the outcome does not depend on
/// list order.
pub fn update_mobs(level: &mut Level, focus: Vec2, tuning: &Tuning, sinks: &mut Sinks<'_>) {
    let shells: Vec<(usize, Aabb)> = level
        .entities
        .iter()
        .enumerate()
        .filter(|(_, e)| e.alive && e.bouncing && !e.despawn)
        .map(|(i, e)| (i, e.body.rect))
        .collect();

    let grid = &level.grid;
    for (index, entity) in level.entities.iter_mut().enumerate() {
        let Some(kind) = entity.mob_kind() else {
            continue;
        };
        if entity.despawn || (entity.body.rect.center().x - focus.x).abs() > tuning.activation_range {
            continue;
        }

        let hit_by_shell = entity.alive
            && kind != MobKind::Mushroom
            && shells
                .iter()
                .any(|(i, rect)| *i != index && rect.intersects(&entity.body.rect));
        if hit_by_shell {
            entity.kill();
            entity.timer = 0;
            sinks.score.add_points(tuning.kill_points);
            sinks.feedback.notify(Feedback::BrickBump);
            log::debug!("mob {:?} hit by shell", entity.id);
        }

        match kind {
            MobKind::Goomba => tick_walker(entity, grid, tuning.goomba_death_ticks, sinks),
            // An eaten mushroom vanishes at once.
            MobKind::Mushroom => tick_walker(entity, grid, 0, sinks),
            MobKind::Koopa => tick_koopa(entity, grid, tuning, sinks),
        }
    }
}

fn tick_walker(entity: &mut Entity, grid: &TileGrid, death_ticks: u32, sinks: &mut Sinks<'_>) {
    if entity.alive {
        walk(entity, grid, sinks);
    } else {
        count_down_death(entity, death_ticks);
    }
}

fn tick_koopa(entity: &mut Entity, grid: &TileGrid, tuning: &Tuning, sinks: &mut Sinks<'_>) {
    if !entity.alive {
        count_down_death(entity, tuning.koopa_death_ticks);
        return;
    }
    if entity.active {
        walk(entity, grid, sinks);
    } else if entity.bouncing {
        if let Some(patrol) = entity.behaviors.patrol_mut() {
            patrol.speed = tuning.shell_speed;
        }
        walk(entity, grid, sinks);
    } else {
        // Sleeping shell: falls but does not walk, then wakes up.
        entity.timer += 1;
        entity.behaviors.update(&mut entity.body, &Controls::default(), sinks.feedback);
        entity.body.vel.x = 0.0;
        settle(entity, grid);
        if entity.timer >= tuning.shell_sleep_ticks {
            entity.active = true;
            entity.timer = 0;
            if let Some(patrol) = entity.behaviors.patrol_mut() {
                patrol.speed = tuning.patrol_speed;
            }
        }
    }
}

fn walk(entity: &mut Entity, grid: &TileGrid, sinks: &mut Sinks<'_>) {
    entity.behaviors.update(&mut entity.body, &Controls::default(), sinks.feedback);
    settle(entity, grid);
}

fn settle(entity: &mut Entity, grid: &TileGrid) {
    let (vertical, _) = move_body(&mut entity.body, grid);
    if vertical.fell_out {
        log::warn!("mob {:?} fell out of the level", entity.id);
        entity.kill();
        entity.despawn = true;
    }
}

fn count_down_death(entity: &mut Entity, death_ticks: u32) {
    entity.timer += 1;
    if entity.timer >= death_ticks {
        entity.despawn = true;
    }
}
