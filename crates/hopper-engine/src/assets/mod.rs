pub mod level_file;
pub mod manifest;
pub mod registry;
