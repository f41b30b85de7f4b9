pub mod body;
pub mod entity;
pub mod grid;
pub mod player;
