use thiserror::Error;

/// Errors raised while turning a level description into a [`Level`](crate::core::level::Level).
///
/// These only happen at load time. A running simulation never fails.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("level grid is empty ({width}x{height})")]
    EmptyGrid { width: u32, height: u32 },
    #[error("level grid {width}x{height} exceeds the {max} cell limit")]
    TooLarge { width: u32, height: u32, max: u64 },
    #[error("tile size must be positive, got {0}")]
    BadTileSize(f32),
    #[error("{what} at ({col}, {row}) lies outside the {width}x{height} grid")]
    OutOfBounds {
        what: String,
        col: i32,
        row: i32,
        width: u32,
        height: u32,
    },
}
