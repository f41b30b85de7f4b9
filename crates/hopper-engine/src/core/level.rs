use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::entity::{Entity, EntityKind};
use crate::components::grid::TileGrid;

/// Hands out entity ids and holds entities spawned mid-tick until the
/// end-of-tick compaction appends them to the live list.
#[derive(Debug, Clone)]
pub struct Spawner {
    next_id: u32,
    queue: Vec<Entity>,
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            queue: Vec::new(),
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Defer an entity until the current scan is over.
    pub fn queue(&mut self, entity: Entity) {
        self.queue.push(entity);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded level: the static tile grid plus the ordered live entity list.
///
/// The entity list is a flat Vec. Nothing is structurally removed while the
/// list is being scanned: consumed entities set `despawn` and
/// [`Level::compact`] drops them once the tick's scans are done.
#[derive(Debug, Clone)]
pub struct Level {
    pub grid: TileGrid,
    pub entities: Vec<Entity>,
    pub spawner: Spawner,
    /// Player start position in pixels.
    pub spawn_point: Vec2,
}

impl Level {
    pub fn new(grid: TileGrid) -> Self {
        Self {
            grid,
            entities: Vec::with_capacity(64),
            spawner: Spawner::new(),
            spawn_point: Vec2::ZERO,
        }
    }

    pub fn with_spawn_point(mut self, spawn_point: Vec2) -> Self {
        self.spawn_point = spawn_point;
        self
    }

    /// Add an entity immediately. Only for use outside a tick (level loading, tests).
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn next_id(&mut self) -> EntityId {
        self.spawner.next_id()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Index of the block entity occupying grid cell `(col, row)`.
    pub fn block_at(&self, col: i32, row: i32) -> Option<usize> {
        self.entities.iter().position(|e| {
            matches!(e.kind, EntityKind::Block(_))
                && !e.despawn
                && self.grid.cell_of(e.body.rect.center()) == (col, row)
        })
    }

    /// Drop entities marked for despawn, then append everything spawned during
    /// the tick. Returns the number of entities removed.
    pub fn compact(&mut self) -> usize {
        let before = self.entities.len();
        self.entities.retain(|e| !e.despawn);
        let removed = before - self.entities.len();
        self.entities.append(&mut self.spawner.queue);
        removed
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
