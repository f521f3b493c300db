//! Human readable SPAD map description.
use crate::error::ConfigError;
use crate::geometry::{MAX_X_SIZE, MAX_Y_SIZE};

/// A SPAD map as a user writes it down.
///
/// Both `channels` and `enable` list the top row first, the way the map
/// reads on screen. The encoder flips them so row 0 is the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mask<'a> {
    /// One packed word per row, bit `x` set enables SPAD `x` of that row.
    pub enable: &'a [u32],
    /// Row-major TDC channel id (`0..=9`) of every SPAD.
    pub channels: &'a [u8],
    /// Free identifier, not used by the encoder.
    pub id: u8,
    /// Offset of the map center from the FOV center in x (Q1).
    pub x_offset_q1: i8,
    /// Offset of the map center from the FOV center in y (Q1).
    pub y_offset_q1: i8,
    pub x_size: u8,
    pub y_size: u8,
}

impl<'a> Mask<'a> {
    /// Create a mask without an offset from the FOV center.
    pub fn new(enable: &'a [u32], channels: &'a [u8], x_size: u8, y_size: u8) -> Self {
        Mask {
            enable,
            channels,
            id: 0,
            x_offset_q1: 0,
            y_offset_q1: 0,
            x_size,
            y_size,
        }
    }

    /// Shift the map from the FOV center, in half-SPAD units.
    pub fn offset(mut self, x_offset_q1: i8, y_offset_q1: i8) -> Self {
        self.x_offset_q1 = x_offset_q1;
        self.y_offset_q1 = y_offset_q1;

        self
    }

    /// Set the id stored with the map.
    pub fn id(mut self, id: u8) -> Self {
        self.id = id;

        self
    }

    /// Number of SPADs covered by the map.
    pub fn cell_count(&self) -> usize {
        usize::from(self.x_size) * usize::from(self.y_size)
    }
}

/// Pack a row-major enable matrix (any non-zero entry enables the SPAD)
/// into one word per row. Row order is kept.
pub fn pack_enable_matrix(
    matrix: &[u8],
    x_size: u8,
    y_size: u8,
) -> Result<[u32; MAX_Y_SIZE as usize], ConfigError> {
    let (width, height) = (usize::from(x_size), usize::from(y_size));
    if x_size > MAX_X_SIZE || y_size > MAX_Y_SIZE || matrix.len() < width * height {
        debug!(
            "enable matrix {}x{} does not fit {} entries",
            x_size,
            y_size,
            matrix.len()
        );
        return Err(ConfigError::OutOfBounds);
    }

    let mut packed = [0u32; MAX_Y_SIZE as usize];
    if width == 0 {
        return Ok(packed);
    }

    for (word, row) in packed.iter_mut().zip(matrix.chunks_exact(width).take(height)) {
        *word = row
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell != 0)
            .fold(0u32, |acc, (x, _)| acc | (1u32 << x));
    }

    Ok(packed)
}
