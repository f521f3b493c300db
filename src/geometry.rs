//! Placement of a SPAD map inside the SPAD array.
//!
//! All centers and offsets are in Q1 format (multiplied by 2), so a center
//! between two SPADs is representable. The real FOV center comes from a fuse
//! that is not known up front, therefore every placement is checked for both
//! the even and the odd center.
#[cfg(feature = "serde")]
use serde::Serialize;

/// Number of SPADs in the SPAD array in x direction.
pub const MAIN_SPAD_COLUMNS: u8 = 34;
/// Number of SPADs in the SPAD array in y direction.
pub const MAIN_SPAD_ROWS: u8 = 18;

/// Maximum amount of SPADs selected in one row of a SPAD map.
pub const MAX_X_SIZE: u8 = 18;
/// Maximum amount of SPADs selected in one column of a SPAD map.
pub const MAX_Y_SIZE: u8 = 10;

/// Width of the area in which screamers can be masked.
pub const SCREAMER_MAX_X_SIZE: u8 = 18;
/// Height of the area in which screamers can be masked.
/// Two rows larger than [`MAX_Y_SIZE`] as the map can be shifted in y for macro mode.
pub const SCREAMER_MAX_Y_SIZE: u8 = 12;

/// Center of a SPAD area in Q1 format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FovCenter {
    x_center_q1: u8,
    y_center_q1: u8,
}

impl FovCenter {
    /// SPAD array center used for even sized maps.
    pub const ARRAY_EVEN: FovCenter = FovCenter::new(MAIN_SPAD_COLUMNS, MAIN_SPAD_ROWS);
    /// SPAD array center used for odd sized maps.
    pub const ARRAY_ODD: FovCenter = FovCenter::new(MAIN_SPAD_COLUMNS - 1, MAIN_SPAD_ROWS - 1);
    /// Center of the screamer area for even sized maps.
    pub const SCREAMER_EVEN: FovCenter = FovCenter::new(SCREAMER_MAX_X_SIZE, SCREAMER_MAX_Y_SIZE);
    /// Center of the screamer area for odd sized maps.
    pub const SCREAMER_ODD: FovCenter =
        FovCenter::new(SCREAMER_MAX_X_SIZE - 1, SCREAMER_MAX_Y_SIZE - 1);

    /// Create a center from Q1 coordinates.
    pub const fn new(x_center_q1: u8, y_center_q1: u8) -> Self {
        FovCenter {
            x_center_q1,
            y_center_q1,
        }
    }

    /// Horizontal center in half-SPAD units.
    pub fn x_center_q1(&self) -> u8 {
        self.x_center_q1
    }

    /// Vertical center in half-SPAD units.
    pub fn y_center_q1(&self) -> u8 {
        self.y_center_q1
    }

    /// Place a region around this center.
    ///
    /// # Arguments
    ///
    /// * `x_offset_q1` - Offset of the region center from this center in x (Q1).
    /// * `y_offset_q1` - Offset of the region center from this center in y (Q1).
    /// * `x_size` - Width of the region in SPADs.
    /// * `y_size` - Height of the region in SPADs.
    pub fn place(&self, x_offset_q1: i8, y_offset_q1: i8, x_size: u8, y_size: u8) -> Region {
        Region {
            x: Span::new(self.x_center_q1, x_offset_q1, x_size),
            y: Span::new(self.y_center_q1, y_offset_q1, y_size),
        }
    }
}

/// Lower left corner (x or y) of a region in the SPAD array.
///
/// Signed division truncates toward zero, so `-1 / 2` is `0`. Offsets at the
/// edge of the array depend on this rounding.
pub fn lower_left_corner(center_q1: u8, offset_q1: i8, size: u8) -> i32 {
    (i32::from(center_q1) + i32::from(offset_q1) - i32::from(size)) / 2
}

/// Upper right corner (x or y) of a region, inclusive.
pub fn upper_right_corner(lower_left: i32, size: u8) -> i32 {
    lower_left + i32::from(size) - 1
}

/// Inclusive extent of a region along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub lower: i32,
    pub upper: i32,
}

impl Span {
    pub fn new(center_q1: u8, offset_q1: i8, size: u8) -> Self {
        let lower = lower_left_corner(center_q1, offset_q1, size);
        Span {
            lower,
            upper: upper_right_corner(lower, size),
        }
    }

    /// Distance between the lower and upper corner.
    pub fn extent(&self) -> i32 {
        self.upper - self.lower
    }

    /// True if the span lies completely in `0..limit`.
    pub fn fits_within(&self, limit: u8) -> bool {
        self.lower >= 0 && self.upper < i32::from(limit)
    }
}

/// A placed region, both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: Span,
    pub y: Span,
}

impl Region {
    pub fn fits_within(&self, x_limit: u8, y_limit: u8) -> bool {
        self.x.fits_within(x_limit) && self.y.fits_within(y_limit)
    }
}
