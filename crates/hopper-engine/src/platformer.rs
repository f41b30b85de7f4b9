//! The platformer game: level lifecycle, pause/restart, and the per-tick
//! system order (mobs, blocks, player, compaction).

use glam::Vec2;

use crate::api::game::{EngineContext, Game, GameConfig};
use crate::api::sinks::Dashboard;
use crate::api::types::{EntityId, GameEvent};
use crate::assets::level_file::{LevelDescriptor, DEFAULT_LEVEL};
use crate::bridge::snapshot::{body_kind, BodyInstance, SnapshotBuffer};
use crate::components::entity::{Entity, EntityKind, MobKind};
use crate::components::grid::{Tile, TileGrid, TileKind};
use crate::components::player::{Player, PlayerState, PowerTier};
use crate::core::level::Level;
use crate::core::tuning::Tuning;
use crate::error::LevelError;
use crate::input::queue::{Action, Controls, InputEvent, InputQueue};
use crate::systems::blocks::{bump_offset, update_blocks};
use crate::systems::mobs::update_mobs;
use crate::systems::player::tick_player;

pub struct Platformer {
    config: GameConfig,
    /// Config tuning with the current level's overrides applied.
    tuning: Tuning,
    player: Player,
    controls: Controls,
    paused: bool,
    /// Source of the current level, replayed on restart.
    level_json: Option<String>,
    last_score: Dashboard,
    last_power: PowerTier,
    last_state: PlayerState,
}

impl Platformer {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        let tuning = config.tuning.clone();
        let player = Player::new(EntityId(0), Vec2::ZERO, &tuning);
        Self {
            config,
            tuning,
            player,
            controls: Controls::default(),
            paused: false,
            level_json: None,
            last_score: Dashboard::new(),
            last_power: PowerTier::Base,
            last_state: PlayerState::Playing,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Build the level first so a bad description leaves the running game untouched.
    fn start(&mut self, ctx: &mut EngineContext, json: &str) -> Result<(), LevelError> {
        let desc = LevelDescriptor::from_json(json)?;
        let tuning = desc.tuning(&self.config.tuning);
        let level = desc.build(&tuning)?;
        self.tuning = tuning;
        self.level_json = Some(json.to_string());
        self.begin(ctx, level);
        Ok(())
    }

    fn begin(&mut self, ctx: &mut EngineContext, mut level: Level) {
        let id = level.next_id();
        self.player = Player::new(id, level.spawn_point, &self.tuning);
        ctx.level = level;
        ctx.dashboard.reset();
        self.controls.reset();
        self.paused = false;
        self.last_score = ctx.dashboard;
        self.last_power = self.player.power;
        self.last_state = self.player.state;
    }

    /// Flat ground the width of two screens. Used when no level loads.
    fn fallback_level(tuning: &Tuning) -> Level {
        let mut grid = TileGrid::new(40, 15, tuning.tile_size);
        grid.fill_rect(0, 13, 40, 2, Some(Tile::new(TileKind::Ground)));
        Level::new(grid).with_spawn_point(Vec2::new(2.0 * tuning.tile_size, 12.0 * tuning.tile_size))
    }

    fn restart(&mut self, ctx: &mut EngineContext) {
        log::info!("restarting level");
        match self.level_json.clone() {
            Some(json) => {
                if let Err(err) = self.start(ctx, &json) {
                    log::error!("restart failed: {err}");
                    self.begin(ctx, Self::fallback_level(&self.tuning));
                }
            }
            None => self.begin(ctx, Self::fallback_level(&self.tuning)),
        }
    }

    fn emit_changes(&mut self, ctx: &mut EngineContext) {
        if ctx.dashboard != self.last_score {
            ctx.emit_event(GameEvent::score(ctx.dashboard.points, ctx.dashboard.coins));
            self.last_score = ctx.dashboard;
        }
        if self.player.power != self.last_power {
            ctx.emit_event(GameEvent::power(self.player.power.level()));
            self.last_power = self.player.power;
        }
        if self.player.state != self.last_state {
            match self.player.state {
                PlayerState::Dead => ctx.emit_event(GameEvent::game_over()),
                PlayerState::Won => ctx.emit_event(GameEvent::win()),
                PlayerState::Playing => {}
            }
            self.last_state = self.player.state;
        }
    }
}

impl Default for Platformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Platformer {
    fn config(&self) -> GameConfig {
        self.config.clone()
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        if let Err(err) = self.start(ctx, DEFAULT_LEVEL) {
            log::error!("built-in level failed to load: {err}");
            self.begin(ctx, Self::fallback_level(&self.tuning));
        }
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let mut restart = false;
        for event in input.iter() {
            match event {
                InputEvent::Pressed(Action::Pause) => {
                    self.paused = !self.paused;
                    log::info!("paused: {}", self.paused);
                }
                InputEvent::Pressed(Action::Restart) => restart = true,
                other => self.controls.apply(*other),
            }
        }
        if restart {
            self.restart(ctx);
            return;
        }
        if self.paused || !self.player.is_playing() {
            self.controls.end_tick();
            return;
        }

        let focus = self.player.rect().center();
        {
            let (level, mut sinks) = ctx.split();
            update_mobs(level, focus, &self.tuning, &mut sinks);
            update_blocks(level, &self.tuning);
            tick_player(&mut self.player, level, &self.controls, &self.tuning, &mut sinks);
            level.compact();
        }
        self.controls.end_tick();
        self.emit_changes(ctx);
    }

    fn load_level(&mut self, ctx: &mut EngineContext, json: &str) -> Result<(), LevelError> {
        self.start(ctx, json)
    }

    fn render(&self, ctx: &EngineContext, out: &mut SnapshotBuffer) {
        for entity in ctx.level.iter().filter(|e| !e.despawn) {
            out.push(self.entity_instance(entity));
        }
        out.push(self.player_instance());
    }
}

impl Platformer {
    fn entity_instance(&self, entity: &Entity) -> BodyInstance {
        let rect = entity.body.rect;
        let facing = entity.behaviors.patrol().map_or(0.0, |p| p.direction.sign());
        let (kind, state, offset_y) = match &entity.kind {
            EntityKind::Mob(mob) => {
                let kind = match mob {
                    MobKind::Goomba => body_kind::GOOMBA,
                    MobKind::Koopa => body_kind::KOOPA,
                    MobKind::Mushroom => body_kind::MUSHROOM,
                };
                let state = if !entity.alive {
                    3.0
                } else if entity.bouncing {
                    2.0
                } else if !entity.active {
                    1.0
                } else {
                    0.0
                };
                (kind, state, 0.0)
            }
            EntityKind::Item => (body_kind::COIN, 0.0, 0.0),
            EntityKind::Block(block) => (
                body_kind::BLOCK,
                if block.triggered() { 1.0 } else { 0.0 },
                bump_offset(block, &self.tuning),
            ),
            EntityKind::Decoration => (body_kind::GOAL, 0.0, 0.0),
            EntityKind::Player => (body_kind::PLAYER, 0.0, 0.0),
        };
        BodyInstance {
            x: rect.left(),
            y: rect.top(),
            width: rect.width(),
            height: rect.height(),
            kind,
            state,
            facing,
            offset_y,
        }
    }

    fn player_instance(&self) -> BodyInstance {
        let rect = *self.player.rect();
        let mut state = self.player.power.level() as f32;
        if self.player.is_invincible() {
            state += 2.0;
        }
        if self.player.is_happy() {
            state += 4.0;
        }
        if self.player.state == PlayerState::Dead {
            state += 8.0;
        }
        let facing = self
            .player
            .entity
            .behaviors
            .go()
            .map_or(1.0, |g| g.heading().sign());
        BodyInstance {
            x: rect.left(),
            y: rect.top(),
            width: rect.width(),
            height: rect.height(),
            kind: body_kind::PLAYER,
            state,
            facing,
            offset_y: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{event_kind, Feedback};

    const TINY: &str = r#"{
        "width": 30, "height": 10, "spawn": [2, 7],
        "fills": [{ "kind": "ground", "col": 0, "row": 8, "w": 30, "h": 2 }],
        "entities": [
            { "kind": "coin", "col": 4, "row": 7 },
            { "kind": "goal", "col": 20, "row": 7 }
        ]
    }"#;

    fn started() -> (Platformer, EngineContext) {
        let mut game = Platformer::new();
        let mut ctx = EngineContext::new();
        game.load_level(&mut ctx, TINY).unwrap();
        (game, ctx)
    }

    fn hold(action: Action) -> InputQueue {
        let mut q = InputQueue::new();
        q.push(InputEvent::Pressed(action));
        q
    }

    #[test]
    fn init_loads_built_in_level() {
        let mut game = Platformer::new();
        let mut ctx = EngineContext::new();
        game.init(&mut ctx);
        assert_eq!(ctx.level.grid.width, 100);
        assert_eq!(game.player().rect().pos(), ctx.level.spawn_point);
        assert!(game.player().is_playing());
    }

    #[test]
    fn walking_right_collects_coin_and_reports_score() {
        let (mut game, mut ctx) = started();
        game.update(&mut ctx, &hold(Action::MoveRight));
        let empty = InputQueue::new();
        let mut saw_score = false;
        for _ in 0..60 {
            game.update(&mut ctx, &empty);
            saw_score |= ctx.events.iter().any(|e| e.kind == event_kind::SCORE);
            ctx.clear_frame_data();
        }
        assert!(saw_score);
        assert_eq!(ctx.dashboard.coins, 1);
        assert_eq!(ctx.dashboard.points, 100);
        assert_eq!(ctx.level.len(), 1);
    }

    #[test]
    fn reaching_goal_wins_once() {
        let (mut game, mut ctx) = started();
        game.update(&mut ctx, &hold(Action::MoveRight));
        let empty = InputQueue::new();
        let mut wins = 0;
        for _ in 0..400 {
            game.update(&mut ctx, &empty);
            wins += ctx.events.iter().filter(|e| e.kind == event_kind::WIN).count();
            ctx.clear_frame_data();
        }
        assert_eq!(game.player().state, PlayerState::Won);
        assert_eq!(wins, 1);
    }

    #[test]
    fn pause_freezes_the_world() {
        let (mut game, mut ctx) = started();
        game.update(&mut ctx, &hold(Action::Pause));
        assert!(game.is_paused());
        let before = *game.player().rect();
        for _ in 0..10 {
            game.update(&mut ctx, &hold(Action::MoveRight));
        }
        assert_eq!(*game.player().rect(), before);
        game.update(&mut ctx, &hold(Action::Pause));
        assert!(!game.is_paused());
    }

    #[test]
    fn restart_resets_player_and_score() {
        let (mut game, mut ctx) = started();
        game.update(&mut ctx, &hold(Action::MoveRight));
        for _ in 0..60 {
            game.update(&mut ctx, &InputQueue::new());
        }
        assert_eq!(ctx.dashboard.coins, 1);
        game.update(&mut ctx, &hold(Action::Restart));
        assert_eq!(ctx.dashboard, Dashboard::new());
        assert_eq!(game.player().rect().pos(), ctx.level.spawn_point);
        assert_eq!(ctx.level.len(), 2);
    }

    #[test]
    fn bad_level_keeps_current_one() {
        let (mut game, mut ctx) = started();
        let err = game.load_level(&mut ctx, r#"{ "width": 0, "height": 3, "spawn": [0, 0] }"#);
        assert!(err.is_err());
        assert_eq!(ctx.level.grid.width, 30);
    }

    #[test]
    fn jump_feedback_reaches_the_context() {
        let (mut game, mut ctx) = started();
        // Settle onto the ground.
        game.update(&mut ctx, &InputQueue::new());
        game.update(&mut ctx, &hold(Action::Jump));
        assert!(ctx.feedback.contains(Feedback::Jump));
    }

    #[test]
    fn render_writes_every_body_and_the_player_last() {
        let (game, ctx) = started();
        let mut out = SnapshotBuffer::new();
        game.render(&ctx, &mut out);
        assert_eq!(out.body_count(), 3);
        assert_eq!(out.bodies[2].kind, body_kind::PLAYER);
        assert_eq!(out.bodies[0].kind, body_kind::COIN);
    }
}
