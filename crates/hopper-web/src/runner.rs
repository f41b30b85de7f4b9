use hopper_engine::{
    Action, AssetManifest, EngineContext, FrameClock, Game, GameConfig, InputEvent, InputQueue,
    KeyBindings, LevelError, ProtocolLayout, SnapshotBuffer, SoundRegistry,
};
use hopper_engine::bridge::protocol::HEADER_FLOATS;

/// Generic game runner that wires up the engine loop.
///
/// The crate root creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    snapshot: SnapshotBuffer,
    clock: FrameClock,
    config: GameConfig,
    layout: ProtocolLayout,
    keys: KeyBindings,
    sounds: SoundRegistry,
    initialized: bool,
    frame: u64,
    header: [f32; HEADER_FLOATS],
    /// Flat buffer of sound ids for shared buffer reads.
    sound_buffer: Vec<f32>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let clock = FrameClock::new(config.fixed_dt, config.max_catch_up_steps);
        let layout = ProtocolLayout::from_config(&config);

        Self {
            snapshot: SnapshotBuffer::with_capacity(config.max_bodies),
            sound_buffer: Vec::with_capacity(config.max_sounds),
            keys: config.keys.clone(),
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            clock,
            layout,
            config,
            sounds: SoundRegistry::new(),
            initialized: false,
            frame: 0,
            header: [0.0; HEADER_FLOATS],
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
        self.build_frame();
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn key_down(&mut self, key_code: u32) {
        self.map_key(key_code, InputEvent::Pressed);
    }

    pub fn key_up(&mut self, key_code: u32) {
        self.map_key(key_code, InputEvent::Released);
    }

    fn map_key(&mut self, key_code: u32, make: fn(Action) -> InputEvent) {
        match self.keys.action_for(key_code) {
            Some(action) => self.input.push(make(action)),
            None => log::debug!("unbound key {}", key_code),
        }
    }

    /// Run one host frame: as many fixed ticks as the clock allows, then
    /// rebuild the snapshot, sound and event buffers.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.clock.accumulate(dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            // Input is consumed by the first tick that runs. Frames with no
            // tick keep it queued for the next one.
            self.input.clear();
        }

        self.build_frame();
    }

    fn build_frame(&mut self) {
        if self.ctx.events.len() > self.layout.max_events {
            log::warn!("dropping {} game events", self.ctx.events.len() - self.layout.max_events);
            self.ctx.events.truncate(self.layout.max_events);
        }

        self.sound_buffer.clear();
        for feedback in self.ctx.feedback.iter().take(self.layout.max_sounds) {
            self.sound_buffer.push(self.sounds.sound_for(*feedback).0 as f32);
        }

        self.snapshot.clear();
        self.game.render(&self.ctx, &mut self.snapshot);

        self.frame += 1;
        self.header = self.layout.header(
            self.frame,
            self.snapshot.bodies.len(),
            self.sound_buffer.len(),
            self.ctx.events.len(),
        );
    }

    /// Load a sound manifest. A malformed manifest keeps the current table.
    pub fn load_manifest(&mut self, json: &str) {
        match AssetManifest::from_json(json) {
            Ok(manifest) => {
                self.sounds = SoundRegistry::from_manifest(&manifest);
                log::info!("manifest loaded: {} sounds", manifest.sounds.len());
            }
            Err(e) => log::error!("failed to parse manifest: {}", e),
        }
    }

    /// Replace the running level. On error the current level keeps running.
    pub fn load_level(&mut self, json: &str) -> Result<(), LevelError> {
        self.game.load_level(&mut self.ctx, json)?;
        self.clock.reset();
        self.input.clear();
        self.build_frame();
        Ok(())
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for shared buffer reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn bodies_ptr(&self) -> *const f32 {
        self.snapshot.bodies_ptr()
    }

    pub fn body_count(&self) -> u32 {
        self.snapshot.body_count()
    }

    pub fn sound_events_ptr(&self) -> *const f32 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn points(&self) -> u32 {
        self.ctx.dashboard.points
    }

    pub fn coins(&self) -> u32 {
        self.ctx.dashboard.coins
    }

    pub fn tick_count(&self) -> u64 {
        self.clock.ticks()
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_bodies(&self) -> u32 {
        self.layout.max_bodies as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn tile_size(&self) -> f32 {
        self.ctx.level.grid.tile_size
    }

    pub fn level_width(&self) -> f32 {
        self.ctx.level.grid.pixel_width()
    }

    pub fn level_height(&self) -> f32 {
        self.ctx.level.grid.pixel_height()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
