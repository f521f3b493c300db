//! Packed SPAD map as the TMF882x firmware expects it.
#[cfg(feature = "serde")]
use serde::Serialize;

use crate::channel::{decode_channel, encode_channel, ChannelGroup};
use crate::error::ConfigError;
use crate::geometry::{FovCenter, MAX_X_SIZE, MAX_Y_SIZE, SCREAMER_MAX_X_SIZE, SCREAMER_MAX_Y_SIZE};
use crate::mask::Mask;

/// Machine readable SPAD map.
///
/// Only [`create_config`] builds one, so a `PackedConfig` never mixes
/// channels 0/1 and 8/9 in one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PackedConfig {
    pub(crate) enable_spad: [u32; MAX_Y_SIZE as usize],
    pub(crate) tdc_channel: [u32; MAX_X_SIZE as usize],
    pub(crate) channel_select: u32,
    pub(crate) x_offset_q1: i8,
    pub(crate) y_offset_q1: i8,
    pub(crate) x_size: u8,
    pub(crate) y_size: u8,
}

impl PackedConfig {
    /// Enable bits per row, index 0 is the bottom row.
    pub fn enable_spad(&self) -> &[u32; MAX_Y_SIZE as usize] {
        &self.enable_spad
    }

    /// Bit-plane encoded channel ids per column.
    pub fn tdc_channel(&self) -> &[u32; MAX_X_SIZE as usize] {
        &self.tdc_channel
    }

    /// Bit `y` set if row `y` uses channels 8/9 instead of 0/1.
    pub fn channel_select(&self) -> u32 {
        self.channel_select
    }

    pub fn x_offset_q1(&self) -> i8 {
        self.x_offset_q1
    }

    pub fn y_offset_q1(&self) -> i8 {
        self.y_offset_q1
    }

    pub fn x_size(&self) -> u8 {
        self.x_size
    }

    pub fn y_size(&self) -> u8 {
        self.y_size
    }

    /// Is SPAD (`x`, `y`) enabled? `y` counts from the bottom row.
    pub fn is_spad_enabled(&self, x: u8, y: u8) -> bool {
        match self.enable_spad.get(usize::from(y)) {
            Some(row) if x < 32 => *row & (1u32 << x) != 0,
            _ => false,
        }
    }

    pub fn channel_group(&self, y: u8) -> ChannelGroup {
        if y < 32 && self.channel_select & (1u32 << y) != 0 {
            ChannelGroup::Alternate
        } else {
            ChannelGroup::Primary
        }
    }

    pub fn uses_alternate_channels(&self, y: u8) -> bool {
        self.channel_group(y) == ChannelGroup::Alternate
    }

    /// Decoded channel id of SPAD (`x`, `y`), with 8/9 restored.
    ///
    /// Returns `None` outside the packed arrays.
    pub fn channel_at(&self, x: u8, y: u8) -> Option<u8> {
        if y >= MAX_Y_SIZE {
            return None;
        }
        let word = self.tdc_channel.get(usize::from(x))?;
        Some(self.channel_group(y).restore(decode_channel(*word, y)))
    }
}

/// Convert a human readable [`Mask`] into a [`PackedConfig`].
///
/// Fails if the map is too large, can not be placed in the SPAD array for
/// either FOV center, or mixes channels 0/1 with 8/9 in one row.
pub fn create_config(mask: &Mask<'_>) -> Result<PackedConfig, ConfigError> {
    check_mask_bounds(mask)?;

    for center in [FovCenter::ARRAY_EVEN, FovCenter::ARRAY_ODD] {
        let region = center.place(mask.x_offset_q1, mask.y_offset_q1, mask.x_size, mask.y_size);
        // A negative lower corner can never be masked, it wraps to an oversized span on the device.
        if region.x.lower < 0
            || region.y.lower < 0
            || region.x.extent() >= i32::from(SCREAMER_MAX_X_SIZE)
            || region.y.extent() >= i32::from(SCREAMER_MAX_Y_SIZE)
        {
            debug!(
                "map placed at x {}..{} y {}..{} does not fit the SPAD array",
                region.x.lower,
                region.x.upper,
                region.y.lower,
                region.y.upper
            );
            return Err(ConfigError::OutOfBounds);
        }
    }

    let width = usize::from(mask.x_size);
    let height = usize::from(mask.y_size);

    let mut enable_spad = [0u32; MAX_Y_SIZE as usize];
    for (y, word) in enable_spad.iter_mut().take(height).enumerate() {
        *word = mask.enable[height - 1 - y];
    }

    let mut channel_select = 0u32;
    let mut tdc_channel = [0u32; MAX_X_SIZE as usize];
    for y in 0..height {
        let row = &mask.channels[(height - 1 - y) * width..][..width];
        let mut group = None;
        for &channel in row {
            match (group, ChannelGroup::of(channel)) {
                (_, None) => {}
                (None, pinned) => group = pinned,
                (Some(current), Some(next)) if current != next => {
                    debug!("row {} mixes channels 0/1 and 8/9", y);
                    return Err(ConfigError::OutOfBounds);
                }
                _ => {}
            }
        }
        if group == Some(ChannelGroup::Alternate) {
            channel_select |= 1u32 << y;
        }

        for (word, &channel) in tdc_channel.iter_mut().zip(row) {
            *word |= encode_channel(channel, y as u8);
        }
    }

    trace!(
        "packed {}x{} map, channel select {=u32:#x}",
        mask.x_size,
        mask.y_size,
        channel_select
    );

    Ok(PackedConfig {
        enable_spad,
        tdc_channel,
        channel_select,
        x_offset_q1: mask.x_offset_q1,
        y_offset_q1: mask.y_offset_q1,
        x_size: mask.x_size,
        y_size: mask.y_size,
    })
}

fn check_mask_bounds(mask: &Mask<'_>) -> Result<(), ConfigError> {
    let sizes_ok = (1..=MAX_X_SIZE).contains(&mask.x_size)
        && (1..=MAX_Y_SIZE).contains(&mask.y_size)
        && !(mask.x_size == 1 && mask.y_size == 1);
    if !sizes_ok {
        debug!("map size {}x{} out of range", mask.x_size, mask.y_size);
        return Err(ConfigError::OutOfBounds);
    }
    if mask.channels.len() < mask.cell_count() || mask.enable.len() < usize::from(mask.y_size) {
        debug!(
            "map {}x{} given {} channels and {} enable rows",
            mask.x_size,
            mask.y_size,
            mask.channels.len(),
            mask.enable.len()
        );
        return Err(ConfigError::OutOfBounds);
    }
    Ok(())
}
