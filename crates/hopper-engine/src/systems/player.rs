//! The player's tick and its collision response.
//!
//! Order within a tick: behaviors, Y move, X move, then one scan over the
//! level's entities. Entities consumed during the scan are only marked; the
//! list keeps its shape until [`Level::compact`] runs after the tick.

use crate::api::sinks::Sinks;
use crate::api::types::Feedback;
use crate::behaviors::Direction;
use crate::components::entity::{Entity, EntityCategory};
use crate::components::player::{Player, PlayerState, PowerTier};
use crate::core::level::Level;
use crate::core::tuning::Tuning;
use crate::input::queue::Controls;
use crate::systems::blocks::hit_block;
use crate::systems::entity_collider::{CollisionState, EntityCollider};
use crate::systems::tile_collider::move_body;

/// Run one tick for the player. Does nothing once the player is dead or has won.
pub fn tick_player(
    player: &mut Player,
    level: &mut Level,
    controls: &Controls,
    tuning: &Tuning,
    sinks: &mut Sinks<'_>,
) {
    if !player.is_playing() {
        return;
    }
    player.invincibility = player.invincibility.saturating_sub(1);
    player.happy_ticks = player.happy_ticks.saturating_sub(1);

    let entity = &mut player.entity;
    entity.behaviors.update(&mut entity.body, controls, sinks.feedback);
    let (vertical, _) = move_body(&mut entity.body, &level.grid);

    if vertical.fell_out {
        log::warn!("player fell out of the level");
        game_over(player, sinks);
        return;
    }
    if vertical.landed {
        entity.behaviors.land(&mut entity.body);
    }
    if let Some((col, row)) = vertical.head_hit {
        if let Some(index) = level.block_at(col, row) {
            hit_block(level, index, tuning, sinks);
        }
    }

    resolve_contacts(player, level, tuning, sinks);
}

/// Scan the live entity list once and apply the response for every overlap.
pub fn resolve_contacts(player: &mut Player, level: &mut Level, tuning: &Tuning, sinks: &mut Sinks<'_>) {
    let collider = EntityCollider::new(tuning.top_contact_tolerance);
    for index in 0..level.entities.len() {
        if !player.is_playing() {
            break;
        }
        let target = &level.entities[index];
        if target.despawn {
            continue;
        }
        let state = collider.check(player.rect(), player.entity.body.vel, &target.body.rect);
        if !state.is_colliding {
            continue;
        }

        match target.category() {
            EntityCategory::Item => {
                level.entities[index].despawn = true;
                sinks.score.add_points(tuning.coin_points);
                sinks.score.add_currency(1);
                sinks.feedback.notify(Feedback::Coin);
                player.happy_ticks = tuning.happy_ticks;
            }
            EntityCategory::Block => {
                hit_block(level, index, tuning, sinks);
            }
            EntityCategory::Mob => {
                collide_with_mob(player, &mut level.entities[index], state, tuning, sinks);
            }
            EntityCategory::Decoration => win(player, sinks),
            EntityCategory::Player => {}
        }
    }
}

/// Mob response, first matching branch wins.
///
/// The third branch can never be reached after the second (it needs a live
/// mob, which the second already accepts). It is kept so the table reads
/// the same as the rules it encodes.
pub fn collide_with_mob(
    player: &mut Player,
    mob: &mut Entity,
    state: CollisionState,
    tuning: &Tuning,
    sinks: &mut Sinks<'_>,
) {
    let power_up = mob.mob_kind().is_some_and(|k| k.is_power_up());

    if power_up && mob.alive {
        if player.grow(tuning) {
            log::debug!("player powered up");
        }
        kill_mob(mob, tuning, sinks);
        sinks.feedback.notify(Feedback::PowerUp);
    } else if state.is_top && (mob.alive || mob.bouncing) {
        sinks.feedback.notify(Feedback::Stomp);
        player.entity.body.rect.set_bottom(mob.body.rect.top());
        player.entity.behaviors.request_bounce();
        kill_mob(mob, tuning, sinks);
    } else if state.is_top && mob.alive && !mob.active {
        sinks.feedback.notify(Feedback::Stomp);
        player.entity.body.rect.set_bottom(mob.body.rect.top());
        mob.timer = 0;
        player.entity.behaviors.request_bounce();
        mob.alive = false;
    } else if state.is_colliding && mob.is_dormant() {
        kick(player, mob, tuning, sinks);
    } else if state.is_colliding && mob.alive && !player.is_invincible() {
        take_damage(player, tuning, sinks);
    }
}

/// Stomp kill. Shell-type mobs retreat into a dormant shell instead of dying.
fn kill_mob(mob: &mut Entity, tuning: &Tuning, sinks: &mut Sinks<'_>) {
    if mob.mob_kind().is_some_and(|k| k.is_shell()) {
        mob.enter_shell(tuning.patrol_speed);
    } else {
        mob.kill();
        mob.timer = 0;
    }
    sinks.score.add_points(tuning.kill_points);
    sinks.feedback.notify(Feedback::Kill);
    log::debug!("stomped mob {:?}", mob.id);
}

/// Send a dormant shell sliding away from the player.
fn kick(player: &Player, mob: &mut Entity, tuning: &Tuning, sinks: &mut Sinks<'_>) {
    mob.bouncing = true;
    let direction = if mob.body.rect.left() < player.rect().left() {
        Direction::Left
    } else {
        Direction::Right
    };
    if let Some(patrol) = mob.behaviors.patrol_mut() {
        patrol.direction = direction;
    }
    mob.body.rect.translate(glam::Vec2::new(tuning.kick_nudge * direction.sign(), 0.0));
    sinks.feedback.notify(Feedback::Kick);
    log::debug!("kicked shell {:?} {:?}", mob.id, direction);
}

fn take_damage(player: &mut Player, tuning: &Tuning, sinks: &mut Sinks<'_>) {
    match player.power {
        PowerTier::Base => game_over(player, sinks),
        PowerTier::Powered => {
            player.shrink(tuning);
            sinks.feedback.notify(Feedback::Shrink);
            log::debug!("player shrank");
        }
    }
}

fn game_over(player: &mut Player, sinks: &mut Sinks<'_>) {
    player.state = PlayerState::Dead;
    sinks.feedback.notify(Feedback::Death);
    log::info!("game over");
}

fn win(player: &mut Player, sinks: &mut Sinks<'_>) {
    player.state = PlayerState::Won;
    sinks.feedback.notify(Feedback::Win);
    log::info!("level complete");
}
