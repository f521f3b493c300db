//! Custom SPAD maps for the TMF882x time-of-flight sensor.
//!
//! A SPAD map selects which SPADs of the sensor array are sampled and to
//! which TDC channel each one is routed. [`create_config`] packs a human
//! readable [`Mask`] into the [`PackedConfig`] the firmware loads, and three
//! independent checks must pass before a map is used:
//!
//! - [`check_area`] - the map fits the area where screamers can be masked.
//! - [`check_channel_coverage`] - no reserved channel, every calibration pair is used.
//! - [`check_adjacency`] - every used channel has two adjacent enabled SPADs.
//!
//! [`validate_mask`] runs all of them in one go.
#![no_std]

#[macro_use]
mod log;

pub mod adjacency;
pub mod area;
pub mod channel;
pub mod config;
pub mod coverage;
pub mod error;
pub mod geometry;
pub mod mask;
pub mod registers;

pub use adjacency::{check_adjacency, zone_states, ZoneState};
pub use area::check_area;
pub use channel::{decode_channel, encode_channel, ChannelGroup};
pub use config::{create_config, PackedConfig};
pub use coverage::check_channel_coverage;
pub use error::ConfigError;
pub use geometry::FovCenter;
pub use mask::{pack_enable_matrix, Mask};
pub use registers::{RegisterBlock, RegisterWrite};
#[cfg(feature = "embedded-hal")]
pub use registers::I2cRegisters;

/// Pack `mask` and run every check on it.
///
/// Returns the packed map only if it is safe to load into the sensor.
pub fn validate_mask(mask: &Mask<'_>) -> Result<PackedConfig, ConfigError> {
    let config = create_config(mask)?;
    check_area(&config)?;
    check_channel_coverage(mask.channels, config.x_size(), config.y_size())?;
    check_adjacency(&config)?;

    Ok(config)
}
