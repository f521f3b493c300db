//! Shared fixtures for the integration tests.

#![allow(dead_code)] // Not all test files use all fixtures

use tmf882x_spad::pack_enable_matrix;

pub const SAMPLE_X_SIZE: u8 = 18;
pub const SAMPLE_Y_SIZE: u8 = 6;

/// 3x3 zones of 6x2 SPADs, top row first.
#[rustfmt::skip]
pub const SAMPLE_CHANNELS: [u8; 18 * 6] = [
    // x = 0  1  2  3  4  5  6  7  8  9 10 11 12 13 14 15 16 17
    /* 5 */ 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3,
    /* 4 */ 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3,
    /* 3 */ 4, 4, 4, 4, 4, 4, 5, 5, 5, 5, 5, 5, 6, 6, 6, 6, 6, 6,
    /* 2 */ 4, 4, 4, 4, 4, 4, 5, 5, 5, 5, 5, 5, 6, 6, 6, 6, 6, 6,
    /* 1 */ 7, 7, 7, 7, 7, 7, 8, 8, 8, 8, 8, 8, 9, 9, 9, 9, 9, 9,
    /* 0 */ 7, 7, 7, 7, 7, 7, 8, 8, 8, 8, 8, 8, 9, 9, 9, 9, 9, 9,
];

/// Checkerboard, top row first.
#[rustfmt::skip]
pub const SAMPLE_ENABLE: [u8; 18 * 6] = [
    // x = 0  1  2  3  4  5  6  7  8  9 10 11 12 13 14 15 16 17
    /* 5 */ 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0,
    /* 4 */ 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1,
    /* 3 */ 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0,
    /* 2 */ 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1,
    /* 1 */ 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0,
    /* 0 */ 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1, 0, 1,
];

/// Even columns enabled.
pub const EVEN_COLUMNS: u32 = 0x1_5555;
/// Odd columns enabled.
pub const ODD_COLUMNS: u32 = 0x2_aaaa;

pub fn sample_enable_rows() -> [u32; 10] {
    pack_enable_matrix(&SAMPLE_ENABLE, SAMPLE_X_SIZE, SAMPLE_Y_SIZE).expect("sample map packs")
}

/// Same size and enable pattern as the sample, but channels alternate per
/// column so no two enabled SPADs of one channel touch, not even diagonally.
pub fn column_striped_channels() -> [u8; 18 * 6] {
    let mut channels = [0u8; 18 * 6];
    for (i, channel) in channels.iter_mut().enumerate() {
        *channel = if (i % 18) % 2 == 0 { 2 } else { 3 };
    }
    channels
}
