//! Error types for configuration and construction
//!
//! Every variant is a fail-fast condition: a broken tuning set, a bad grid
//! shape or an unknown name coming from the controller. Nothing here is
//! retryable, and the per-tick path never produces one.

use thiserror::Error;

/// Errors raised while building or reconfiguring the simulation
#[derive(Debug, Error)]
pub enum SimError {
    /// Entity or template with a non-positive extent
    #[error("{what} must have a positive width and height (got {width}x{height})")]
    InvalidDimensions {
        what: &'static str,
        width: f32,
        height: f32,
    },

    /// Grid with zero rows or columns
    #[error("grid needs at least one row and one column (got {rows} rows, {columns} columns)")]
    InvalidGrid { rows: usize, columns: usize },

    #[error("star count must not be negative (got {0})")]
    NegativeStarCount(i32),

    #[error("level-up factor must not be zero")]
    ZeroLevelUpFactor,

    /// Tuning value outside its allowed range
    #[error("tuning value `{name}` is out of range (got {value}, expected {expected})")]
    InvalidTuning {
        name: &'static str,
        value: f32,
        expected: &'static str,
    },

    #[error("viewport must not be negative (got {width}x{height})")]
    InvalidViewport { width: i32, height: i32 },

    #[error("unknown difficulty `{0}`")]
    UnknownDifficulty(String),

    #[error("unknown bonus kind `{0}`")]
    UnknownBonusKind(String),

    /// Tuning set that failed to parse
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
