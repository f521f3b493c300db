//! Check that a packed map fits the area in which screamers can be masked.
use crate::config::PackedConfig;
use crate::error::ConfigError;
use crate::geometry::{FovCenter, SCREAMER_MAX_X_SIZE, SCREAMER_MAX_Y_SIZE};

/// Check the map with its x/y offset applied lies inside the screamer area,
/// for both the even and the odd center.
pub fn check_area(config: &PackedConfig) -> Result<(), ConfigError> {
    for center in [FovCenter::SCREAMER_EVEN, FovCenter::SCREAMER_ODD] {
        let region = center.place(
            config.x_offset_q1(),
            config.y_offset_q1(),
            config.x_size(),
            config.y_size(),
        );
        if !region.fits_within(SCREAMER_MAX_X_SIZE, SCREAMER_MAX_Y_SIZE) {
            debug!(
                "map at x {}..{} y {}..{} leaves the screamer area (center {} {})",
                region.x.lower,
                region.x.upper,
                region.y.lower,
                region.y.upper,
                center.x_center_q1(),
                center.y_center_q1()
            );
            return Err(ConfigError::OutOfBounds);
        }
    }
    Ok(())
}
