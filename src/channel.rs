//! TDC channel ids and their bit-plane encoding.
//!
//! One column of a SPAD map is packed into a single 32-bit word. Each
//! channel id is 3 bits wide; the LSB, middle and MSB of all rows live in
//! three separate 10-bit planes of the word.
use crate::geometry::MAX_Y_SIZE;

/// Number of TDC channels (ids `0..=9`).
pub const NUMBER_OF_CHANNELS: usize = 10;

/// Bit position of the LSB plane.
pub const LSB_SHIFT: u8 = 0;
/// Bit position of the middle bit plane.
pub const MID_SHIFT: u8 = 10;
/// Bit position of the MSB plane.
pub const MSB_SHIFT: u8 = 20;

/// Channel pairs that each need at least one SPAD for electrical calibration.
/// Channels 0 and 1 are not checked.
pub const CALIBRATION_PAIRS: [(u8, u8); 4] = [(2, 3), (4, 5), (6, 7), (8, 9)];

/// Encode `channel` for row `y` of a column word.
///
/// Only the low three bits are encoded, so 8 and 9 end up as 0 and 1. The
/// row's [`ChannelGroup`] tells them apart. Rows past the last plane row
/// encode to 0.
#[inline]
pub fn encode_channel(channel: u8, y: u8) -> u32 {
    if y >= MAX_Y_SIZE {
        return 0;
    }
    let channel = u32::from(channel);
    ((channel & 1) << (LSB_SHIFT + y))
        | (((channel & 2) >> 1) << (MID_SHIFT + y))
        | (((channel & 4) >> 2) << (MSB_SHIFT + y))
}

/// Decode the 3-bit channel code of row `y` from a column word.
///
/// Rows past the last plane row decode to 0.
#[inline]
pub fn decode_channel(word: u32, y: u8) -> u8 {
    if y >= MAX_Y_SIZE {
        return 0;
    }
    let lsb = (word >> (LSB_SHIFT + y)) & 1;
    let mid = ((word >> (MID_SHIFT + y)) << 1) & 2;
    let msb = ((word >> (MSB_SHIFT + y)) << 2) & 4;
    (lsb | mid | msb) as u8
}

/// Which pair of TDC lines a row is wired to.
///
/// A row may use channels 0/1 or the alternate channels 8/9, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelGroup {
    Primary,
    Alternate,
}

impl ChannelGroup {
    /// Group a channel id pins its row to, `None` for ids that fit any row.
    pub fn of(channel: u8) -> Option<ChannelGroup> {
        match channel {
            0 | 1 => Some(ChannelGroup::Primary),
            8 | 9 => Some(ChannelGroup::Alternate),
            _ => None,
        }
    }

    /// Map a decoded 3-bit code back to the channel id used in this group.
    pub fn restore(self, code: u8) -> u8 {
        match (self, code) {
            (ChannelGroup::Alternate, 0 | 1) => code + 8,
            _ => code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_land_in_their_planes() {
        assert_eq!(encode_channel(1, 0), 1);
        assert_eq!(encode_channel(2, 0), 1 << 10);
        assert_eq!(encode_channel(4, 0), 1 << 20);
        assert_eq!(encode_channel(7, 9), (1 << 9) | (1 << 19) | (1 << 29));
    }

    #[test]
    fn alternate_ids_are_masked() {
        assert_eq!(encode_channel(8, 3), encode_channel(0, 3));
        assert_eq!(encode_channel(9, 3), encode_channel(1, 3));
    }

    #[test]
    fn decode_ignores_other_rows() {
        let word = encode_channel(5, 2) | encode_channel(6, 3) | encode_channel(7, 1);
        assert_eq!(decode_channel(word, 1), 7);
        assert_eq!(decode_channel(word, 2), 5);
        assert_eq!(decode_channel(word, 3), 6);
        assert_eq!(decode_channel(word, 4), 0);
    }

    #[test]
    fn rows_past_the_planes_are_empty() {
        for y in [10, 12, 31, 255] {
            assert_eq!(encode_channel(7, y), 0);
            assert_eq!(decode_channel(u32::MAX, y), 0);
        }
        assert_eq!(decode_channel(u32::MAX, 9), 7);
    }

    #[test]
    fn group_restores_alternate_ids() {
        assert_eq!(ChannelGroup::of(1), Some(ChannelGroup::Primary));
        assert_eq!(ChannelGroup::of(9), Some(ChannelGroup::Alternate));
        assert_eq!(ChannelGroup::of(4), None);
        assert_eq!(ChannelGroup::Alternate.restore(1), 9);
        assert_eq!(ChannelGroup::Alternate.restore(5), 5);
        assert_eq!(ChannelGroup::Primary.restore(0), 0);
    }
}
