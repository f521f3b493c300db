//! Register image of a packed SPAD map.
//!
//! The custom SPAD map is loaded into the TMF882x through a block of I2C
//! registers. This module only lays out the bytes; writing them to a bus is
//! left to a [`RegisterWrite`] implementation supplied by the caller, or
//! to [`I2cRegisters`] with the `embedded-hal` feature.
use cfg_if::cfg_if;
use core::fmt::Debug;

use crate::config::PackedConfig;
use crate::geometry::MAX_X_SIZE;

/// First register of the SPAD enable rows (3 bytes per row).
pub const SPAD_ENABLE_SPAD0_0: u8 = 0x24;
/// First register of the TDC channel columns (4 bytes per column).
pub const SPAD_TDC_CHANNEL0_0: u8 = 0x42;
/// Channel 0/1 or 8/9 selection bits (3 bytes).
pub const SPAD_TDC_CHANNEL_SELECT_0: u8 = 0x8a;
pub const SPAD_X_OFFSET_2: u8 = 0x8d;
pub const SPAD_Y_OFFSET_2: u8 = 0x8e;
pub const SPAD_X_SIZE: u8 = 0x8f;
pub const SPAD_Y_SIZE: u8 = 0x90;

const ENABLE_ROW_BYTES: usize = 3;
const TDC_COLUMN_BYTES: usize = 4;
const SELECT_BYTES: usize = 3;

/// Largest block, the TDC channel columns.
pub const MAX_BLOCK_LEN: usize = MAX_X_SIZE as usize * TDC_COLUMN_BYTES;

/// Number of blocks in a SPAD map image.
pub const BLOCK_COUNT: usize = 7;

/// Bytes written in one transfer starting at `register`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterBlock {
    register: u8,
    data: [u8; MAX_BLOCK_LEN],
    len: usize,
}

impl RegisterBlock {
    fn new(register: u8) -> Self {
        RegisterBlock {
            register,
            data: [0; MAX_BLOCK_LEN],
            len: 0,
        }
    }

    /// Append the low `width` bytes of `value`, little endian.
    fn push_le(mut self, value: u32, width: usize) -> Self {
        for (dst, src) in self.data[self.len..self.len + width]
            .iter_mut()
            .zip(value.to_le_bytes())
        {
            *dst = src;
        }
        self.len += width;

        self
    }

    pub fn register(&self) -> u8 {
        self.register
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

/// Sink for register blocks, typically an I2C bus with the sensor address
/// already bound.
pub trait RegisterWrite {
    /// Error return type.
    type Error: Debug;
    /// Write `bytes` to consecutive registers starting at `register`.
    ///
    /// # Arguments
    ///
    /// * `register` - The first register to write (auto increments).
    /// * `bytes` - The bytes to be written.
    fn write_registers(&mut self, register: u8, bytes: &[u8]) -> Result<(), Self::Error>;
}

cfg_if! {
    if #[cfg(feature = "embedded-hal")] {
        /// Default 7-bit I2C address of the TMF882x.
        pub const DEFAULT_ADDRESS: u8 = 0x41;

        /// An I2C bus bound to the sensor address.
        #[derive(Debug)]
        pub struct I2cRegisters<I2C> {
            i2c: I2C,
            address: u8,
        }

        impl<I2C> I2cRegisters<I2C> {
            /// Bind `i2c` to the sensor at `address`.
            pub fn new(i2c: I2C, address: u8) -> Self {
                I2cRegisters { i2c, address }
            }

            pub fn address(&self) -> u8 {
                self.address
            }

            /// Give the bus back.
            pub fn release(self) -> I2C {
                self.i2c
            }
        }
    }
}

cfg_if! {
    if #[cfg(feature = "i2c-iter")] {
        use embedded_hal::blocking::i2c::WriteIter;
        impl<I2C> RegisterWrite for I2cRegisters<I2C>
        where I2C : WriteIter,
            <I2C as WriteIter>::Error : Debug
        {
            type Error = <I2C as WriteIter>::Error;
            fn write_registers(&mut self, register: u8, bytes: &[u8]) -> Result<(), Self::Error> {
                let iter = core::iter::once(register).chain(bytes.iter().cloned());
                self.i2c.write(self.address, iter)
            }
        }
    } else if #[cfg(feature = "embedded-hal")] {
        use embedded_hal::blocking::i2c::Write as I2CWrite;
        impl<I2C> RegisterWrite for I2cRegisters<I2C>
        where I2C : I2CWrite,
            <I2C as I2CWrite>::Error : Debug
        {
            type Error = <I2C as I2CWrite>::Error;
            /// Blocks longer than [`MAX_BLOCK_LEN`] are cut to that length.
            fn write_registers(&mut self, register: u8, bytes: &[u8]) -> Result<(), Self::Error> {
                let mut tmp = [0u8; MAX_BLOCK_LEN + 1];
                tmp[0] = register;
                let len = bytes.len().min(MAX_BLOCK_LEN);
                tmp[1..=len].copy_from_slice(&bytes[..len]);
                self.i2c.write(self.address, &tmp[..=len])
            }
        }
    }
}

impl PackedConfig {
    /// Lay out the map as the register blocks the firmware reads, in
    /// ascending register order.
    pub fn register_blocks(&self) -> [RegisterBlock; BLOCK_COUNT] {
        let enable = self
            .enable_spad
            .iter()
            .fold(RegisterBlock::new(SPAD_ENABLE_SPAD0_0), |block, &row| {
                block.push_le(row, ENABLE_ROW_BYTES)
            });
        let tdc = self
            .tdc_channel
            .iter()
            .fold(RegisterBlock::new(SPAD_TDC_CHANNEL0_0), |block, &column| {
                block.push_le(column, TDC_COLUMN_BYTES)
            });

        [
            enable,
            tdc,
            RegisterBlock::new(SPAD_TDC_CHANNEL_SELECT_0).push_le(self.channel_select, SELECT_BYTES),
            RegisterBlock::new(SPAD_X_OFFSET_2).push_le(u32::from(self.x_offset_q1 as u8), 1),
            RegisterBlock::new(SPAD_Y_OFFSET_2).push_le(u32::from(self.y_offset_q1 as u8), 1),
            RegisterBlock::new(SPAD_X_SIZE).push_le(u32::from(self.x_size), 1),
            RegisterBlock::new(SPAD_Y_SIZE).push_le(u32::from(self.y_size), 1),
        ]
    }

    /// Hand every register block to `writer`, stopping at the first error.
    pub fn write_registers<W: RegisterWrite>(&self, writer: &mut W) -> Result<(), W::Error> {
        for block in self.register_blocks() {
            trace!(
                "writing {} bytes at {=u8:#x}",
                block.bytes().len(),
                block.register()
            );
            writer.write_registers(block.register(), block.bytes())?;
        }
        Ok(())
    }
}
