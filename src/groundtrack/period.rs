use chrono::Duration;
use std::f64::consts::TAU;

use super::error::TrackError;

const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// Duration of one revolution for a mean motion given in radians per minute.
pub fn orbital_period(mean_motion_rad_min: f64) -> Result<Duration, TrackError> {
    if !mean_motion_rad_min.is_finite() || mean_motion_rad_min <= 0.0 {
        return Err(TrackError::InvalidElementSet(format!(
            "mean motion must be positive, got {}",
            mean_motion_rad_min
        )));
    }

    let millis = (TAU / mean_motion_rad_min * MILLIS_PER_MINUTE).round();
    if !millis.is_finite() || millis < 1.0 || millis > i64::MAX as f64 {
        return Err(TrackError::InvalidElementSet(format!(
            "mean motion {} yields an unrepresentable period",
            mean_motion_rad_min
        )));
    }

    Duration::try_milliseconds(millis as i64).ok_or_else(|| {
        TrackError::InvalidElementSet(format!(
            "mean motion {} yields an unrepresentable period",
            mean_motion_rad_min
        ))
    })
}
