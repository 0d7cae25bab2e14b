//! Configuration error types.
//!
//! Nothing in the simulation core is fatal: validation collects every issue
//! so the engine can log them and fall back to degraded behavior.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// No tier rows; every level-up will grow the cap by zero.
    #[error("XP tier table is empty; cap increases default to 0")]
    EmptyTierTable,

    #[error("XP tier {start}..={end} has start after end")]
    InvertedTier { start: u32, end: u32 },

    /// Overlapping rows are legal but only the first match is ever used.
    #[error("XP tiers {first_start}..={first_end} and {second_start}..={second_end} overlap; first match wins")]
    OverlappingTiers {
        first_start: u32,
        first_end: u32,
        second_start: u32,
        second_end: u32,
    },

    #[error("initial XP cap {value} must be positive")]
    NonPositiveXpCap { value: f64 },

    #[error("{slots} weapon slots but {unlocks} unlock levels; missing entries unlock at level 1")]
    UnlockLengthMismatch { slots: usize, unlocks: usize },

    #[error("{context}: fire rate {value} must be positive; slot will never fire")]
    NonPositiveFireRate { context: String, value: f64 },
}

/// Convenience alias: a `Result` using `ConfigError` as the error type.
pub type ConfigResult<T> = Result<T, ConfigError>;
