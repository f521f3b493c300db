//! Error type shared by the encoder and the checks.
use thiserror::Error;

/// Error returned when a SPAD map can not be packed or fails a check.
///
/// The firmware only knows a single "config error" code, so every failing
/// check maps to the same variant. Enable the `defmt` feature to see which
/// check rejected the map.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Sizes, placement, channel assignment or SPAD adjacency out of bounds.
    #[error("SPAD map configuration out of bounds")]
    OutOfBounds,
}
