//! JSON level descriptions.
//!
//! ```json
//! { "width": 100, "height": 15, "spawn": [2, 12],
//!   "fills": [{ "kind": "ground", "col": 0, "row": 13, "w": 40, "h": 2 }],
//!   "entities": [{ "kind": "goomba", "col": 26, "row": 12 }] }
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::entity::{BlockContents, Entity, MobKind};
use crate::components::grid::{Tile, TileGrid, TileKind};
use crate::core::level::Level;
use crate::core::tuning::Tuning;
use crate::error::LevelError;

/// Largest grid `build` accepts, in cells.
pub const MAX_LEVEL_CELLS: u64 = 1 << 20;

/// The level shipped with the engine.
pub const DEFAULT_LEVEL: &str = include_str!("../../levels/1-1.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// Grid width in tiles.
    pub width: u32,
    /// Grid height in tiles.
    pub height: u32,
    /// Overrides `Tuning::tile_size` for this level.
    #[serde(default)]
    pub tile_size: Option<f32>,
    /// Player start cell `[col, row]`.
    pub spawn: [i32; 2],
    #[serde(default)]
    pub fills: Vec<FillDescriptor>,
    #[serde(default)]
    pub entities: Vec<PlacedEntity>,
}

/// A rectangle of identical tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillDescriptor {
    pub kind: TileKind,
    pub col: i32,
    pub row: i32,
    #[serde(default = "one")]
    pub w: u32,
    #[serde(default = "one")]
    pub h: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacedKind {
    Goomba,
    Koopa,
    Mushroom,
    Coin,
    CoinBox,
    PowerupBox,
    Goal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedEntity {
    pub kind: PlacedKind,
    pub col: i32,
    pub row: i32,
}

fn one() -> u32 {
    1
}

impl LevelDescriptor {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// `base` with this level's tile size applied.
    pub fn tuning(&self, base: &Tuning) -> Tuning {
        let mut tuning = base.clone();
        if let Some(size) = self.tile_size {
            tuning.tile_size = size;
        }
        tuning
    }

    /// Validate and build the level. `tuning` should come from [`Self::tuning`].
    pub fn build(&self, tuning: &Tuning) -> Result<Level, LevelError> {
        if self.width == 0 || self.height == 0 {
            return Err(LevelError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if u64::from(self.width) * u64::from(self.height) > MAX_LEVEL_CELLS {
            return Err(LevelError::TooLarge {
                width: self.width,
                height: self.height,
                max: MAX_LEVEL_CELLS,
            });
        }
        let ts = tuning.tile_size;
        if !(ts > 0.0) {
            return Err(LevelError::BadTileSize(ts));
        }

        let [spawn_col, spawn_row] = self.spawn;
        self.check_cell("player spawn", spawn_col, spawn_row)?;

        let mut grid = TileGrid::new(self.width, self.height, ts);
        for fill in &self.fills {
            self.check_cell("tile fill", fill.col, fill.row)?;
            grid.fill_rect(fill.col as u32, fill.row as u32, fill.w, fill.h, Some(Tile::new(fill.kind)));
        }

        let mut level = Level::new(grid).with_spawn_point(cell_pos(spawn_col, spawn_row, ts));
        for placed in &self.entities {
            self.check_cell(placed.kind.label(), placed.col, placed.row)?;
            let pos = cell_pos(placed.col, placed.row, ts);
            let id = level.next_id();
            let entity = match placed.kind {
                PlacedKind::Goomba => Entity::mob(id, MobKind::Goomba, pos, tuning),
                PlacedKind::Koopa => Entity::mob(id, MobKind::Koopa, pos, tuning),
                PlacedKind::Mushroom => Entity::mob(id, MobKind::Mushroom, pos, tuning),
                PlacedKind::Coin => Entity::coin(id, pos, tuning),
                PlacedKind::Goal => Entity::goal(id, pos, tuning),
                PlacedKind::CoinBox | PlacedKind::PowerupBox => {
                    let contents = if placed.kind == PlacedKind::CoinBox {
                        BlockContents::Coin
                    } else {
                        BlockContents::PowerUp
                    };
                    level.grid.set(
                        placed.col as u32,
                        placed.row as u32,
                        Some(Tile::new(TileKind::CoinBlock)),
                    );
                    Entity::block(id, contents, pos, tuning)
                }
            };
            level.spawn(entity);
        }

        log::info!(
            "level loaded: {}x{} tiles, {} solid, {} entities",
            self.width,
            self.height,
            level.grid.tile_count(),
            level.len()
        );
        Ok(level)
    }

    fn check_cell(&self, what: &str, col: i32, row: i32) -> Result<(), LevelError> {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return Err(LevelError::OutOfBounds {
                what: what.to_string(),
                col,
                row,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl PlacedKind {
    fn label(self) -> &'static str {
        match self {
            PlacedKind::Goomba => "goomba",
            PlacedKind::Koopa => "koopa",
            PlacedKind::Mushroom => "mushroom",
            PlacedKind::Coin => "coin",
            PlacedKind::CoinBox => "coin box",
            PlacedKind::PowerupBox => "power-up box",
            PlacedKind::Goal => "goal",
        }
    }
}

fn cell_pos(col: i32, row: i32, tile_size: f32) -> Vec2 {
    Vec2::new(col as f32 * tile_size, row as f32 * tile_size)
}
