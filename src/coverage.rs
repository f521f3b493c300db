//! Electrical calibration check on the human readable channel map.
use crate::channel::{CALIBRATION_PAIRS, NUMBER_OF_CHANNELS};
use crate::error::ConfigError;

/// Check that channel 0 is not used, every id is a valid channel, and each
/// TDC pair used for electrical calibration has at least one SPAD.
///
/// # Arguments
///
/// * `channels` - Row-major channel map, as in [`Mask::channels`](crate::Mask::channels).
/// * `x_size` - Width of the map.
/// * `y_size` - Height of the map.
pub fn check_channel_coverage(channels: &[u8], x_size: u8, y_size: u8) -> Result<(), ConfigError> {
    let cells = usize::from(x_size) * usize::from(y_size);
    let Some(channels) = channels.get(..cells) else {
        debug!("channel map holds {} of {} SPADs", channels.len(), cells);
        return Err(ConfigError::OutOfBounds);
    };

    let mut spads_per_channel = [0usize; NUMBER_OF_CHANNELS];
    for &channel in channels {
        if channel == 0 || usize::from(channel) >= NUMBER_OF_CHANNELS {
            debug!("channel {} can not be assigned", channel);
            return Err(ConfigError::OutOfBounds);
        }
        spads_per_channel[usize::from(channel)] += 1;
    }

    for (a, b) in CALIBRATION_PAIRS {
        if spads_per_channel[usize::from(a)] + spads_per_channel[usize::from(b)] == 0 {
            debug!("no SPAD on channels {}/{}, calibration would fail", a, b);
            return Err(ConfigError::OutOfBounds);
        }
    }
    Ok(())
}
