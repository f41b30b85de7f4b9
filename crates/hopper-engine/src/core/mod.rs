pub mod aabb;
pub mod level;
pub mod time;
pub mod tuning;
