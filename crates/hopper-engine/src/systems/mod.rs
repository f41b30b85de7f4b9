pub mod blocks;
pub mod entity_collider;
pub mod mobs;
pub mod player;
pub mod tile_collider;
