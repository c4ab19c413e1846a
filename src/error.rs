use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("sprite index {index} out of range ({count} sprites)")]
    InvalidSpriteIndex { index: usize, count: usize },

    #[error("{layer} layer has {actual} cells, expected {expected}")]
    GridShape {
        layer: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("grid dimensions must be non-zero")]
    EmptyGrid,
}
