//! Check that every used channel has two adjacent, enabled SPADs.
use crate::channel::NUMBER_OF_CHANNELS;
use crate::config::PackedConfig;
use crate::error::ConfigError;
use crate::geometry::{MAX_X_SIZE, MAX_Y_SIZE};

/// Progress of the adjacency scan for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ZoneState {
    /// No enabled SPAD seen on this channel.
    Unverified,
    /// Enabled SPADs seen, none of them with an enabled neighbour yet.
    Investigate,
    /// Two adjacent enabled SPADs found.
    Verified,
}

/// Neighbours looked at for every enabled SPAD, as (dx, dy). Rows below and
/// the left neighbour were already visited.
const NEIGHBOURS: [(i8, i8); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

type ChannelGrid = [[u8; MAX_X_SIZE as usize]; MAX_Y_SIZE as usize];

/// Check the SPAD map size and that each used channel has at least two
/// adjacent enabled SPADs, in any direction.
pub fn check_adjacency(config: &PackedConfig) -> Result<(), ConfigError> {
    let zones = zone_states(config)?;
    match zones.iter().position(|&z| z == ZoneState::Investigate) {
        Some(channel) => {
            debug!("channel {} has no two adjacent enabled SPADs", channel);
            Err(ConfigError::OutOfBounds)
        }
        None => Ok(()),
    }
}

/// Run the adjacency scan and return the final state of every channel.
pub fn zone_states(config: &PackedConfig) -> Result<[ZoneState; NUMBER_OF_CHANNELS], ConfigError> {
    let (x_size, y_size) = (config.x_size(), config.y_size());
    if !(1..=MAX_X_SIZE).contains(&x_size)
        || !(1..=MAX_Y_SIZE).contains(&y_size)
        || (x_size == 1 && y_size == 1)
    {
        debug!("map size {}x{} out of range", x_size, y_size);
        return Err(ConfigError::OutOfBounds);
    }

    let grid = decode_grid(config);
    let at = |x: u8, y: u8| grid[usize::from(y)][usize::from(x)];

    let mut zones = [ZoneState::Unverified; NUMBER_OF_CHANNELS];
    for y in 0..y_size {
        for x in 0..x_size {
            let channel = at(x, y);
            let Some(zone) = zones.get_mut(usize::from(channel)) else {
                continue;
            };
            if *zone == ZoneState::Verified || !config.is_spad_enabled(x, y) {
                continue;
            }

            let paired = NEIGHBOURS.iter().any(|&(dx, dy)| {
                match (x.checked_add_signed(dx), y.checked_add_signed(dy)) {
                    (Some(nx), Some(ny)) if nx < x_size && ny < y_size => {
                        at(nx, ny) == channel && config.is_spad_enabled(nx, ny)
                    }
                    _ => false,
                }
            });
            *zone = if paired {
                ZoneState::Verified
            } else {
                ZoneState::Investigate
            };
        }
    }

    trace!("zone states {}", zones);
    Ok(zones)
}

/// Decode the channel of every SPAD in the map, row 0 at the bottom.
fn decode_grid(config: &PackedConfig) -> ChannelGrid {
    let mut grid = [[NUMBER_OF_CHANNELS as u8; MAX_X_SIZE as usize]; MAX_Y_SIZE as usize];
    for y in 0..config.y_size() {
        for x in 0..config.x_size() {
            if let Some(channel) = config.channel_at(x, y) {
                grid[usize::from(y)][usize::from(x)] = channel;
            }
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::encode_channel;

    fn config(rows: &[(&[u8], u32)], channel_select: u32) -> PackedConfig {
        let mut enable_spad = [0; 10];
        let mut tdc_channel = [0; 18];
        for (y, (channels, enable)) in rows.iter().enumerate() {
            enable_spad[y] = *enable;
            for (x, &ch) in channels.iter().enumerate() {
                tdc_channel[x] |= encode_channel(ch, y as u8);
            }
        }
        PackedConfig {
            enable_spad,
            tdc_channel,
            channel_select,
            x_offset_q1: 0,
            y_offset_q1: 0,
            x_size: rows[0].0.len() as u8,
            y_size: rows.len() as u8,
        }
    }

    #[test]
    fn horizontal_pair_verifies() {
        let cfg = config(&[(&[2, 2, 3], 0b011)], 0);
        let zones = zone_states(&cfg).unwrap();
        assert_eq!(zones[2], ZoneState::Verified);
        assert_eq!(zones[3], ZoneState::Unverified);
        assert_eq!(check_adjacency(&cfg), Ok(()));
    }

    #[test]
    fn isolated_spad_fails() {
        let cfg = config(&[(&[2, 2, 3], 0b101)], 0);
        let zones = zone_states(&cfg).unwrap();
        assert_eq!(zones[2], ZoneState::Investigate);
        assert_eq!(zones[3], ZoneState::Investigate);
        assert_eq!(check_adjacency(&cfg), Err(ConfigError::OutOfBounds));
    }

    #[test]
    fn diagonal_pairs_verify() {
        // upper right
        let cfg = config(&[(&[4, 5], 0b01), (&[5, 4], 0b10)], 0);
        assert_eq!(zone_states(&cfg).unwrap()[4], ZoneState::Verified);
        // upper left
        let cfg = config(&[(&[4, 5], 0b10), (&[5, 4], 0b01)], 0);
        assert_eq!(zone_states(&cfg).unwrap()[5], ZoneState::Verified);
    }

    #[test]
    fn vertical_pair_in_alternate_rows() {
        let cfg = config(&[(&[9, 2], 0b01), (&[9, 2], 0b01)], 0b11);
        let zones = zone_states(&cfg).unwrap();
        assert_eq!(zones[9], ZoneState::Verified);
        assert_eq!(zones[1], ZoneState::Unverified);
        assert_eq!(zones[2], ZoneState::Unverified);
    }

    #[test]
    fn verified_zone_is_not_downgraded() {
        let cfg = config(&[(&[6, 6, 7, 6], 0b1011)], 0);
        let zones = zone_states(&cfg).unwrap();
        assert_eq!(zones[6], ZoneState::Verified);
        assert_eq!(zones[7], ZoneState::Unverified);
    }

    #[test]
    fn later_pair_rescues_investigated_zone() {
        let cfg = config(&[(&[6, 7, 6, 6], 0b1101)], 0);
        assert_eq!(zone_states(&cfg).unwrap()[6], ZoneState::Verified);
    }

    #[test]
    fn disabled_neighbour_does_not_count() {
        let cfg = config(&[(&[8, 8], 0b01), (&[8, 8], 0b00)], 0b11);
        assert_eq!(check_adjacency(&cfg), Err(ConfigError::OutOfBounds));
    }

    #[test]
    fn rejects_bad_sizes() {
        let mut cfg = config(&[(&[2, 2], 0b11)], 0);
        cfg.x_size = 1;
        assert_eq!(check_adjacency(&cfg), Err(ConfigError::OutOfBounds));
        cfg.x_size = 0;
        cfg.y_size = 3;
        assert_eq!(check_adjacency(&cfg), Err(ConfigError::OutOfBounds));
        cfg.x_size = 19;
        assert_eq!(check_adjacency(&cfg), Err(ConfigError::OutOfBounds));
        cfg.x_size = 2;
        cfg.y_size = 11;
        assert_eq!(check_adjacency(&cfg), Err(ConfigError::OutOfBounds));
    }
}
