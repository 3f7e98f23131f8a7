mod error;
mod period;
mod sampler;
mod segments;
mod types;
mod unwrap;

use chrono::{DateTime, Utc};

pub use error::TrackError;
pub use period::orbital_period;
pub use sampler::sample_ground_track;
pub use segments::{rewrap_longitude, split_segments};
pub use types::{
    GeodeticSample, Segment, Track, TrackSettings, DEFAULT_SAMPLES, DEFAULT_SPLIT_THRESHOLD_DEG,
};
pub use unwrap::{shortest_delta, unwrap_longitudes};

use crate::propagate::{ElementSet, Propagator};

/// Computes one revolution of display-ready ground track starting at `start`.
pub fn compute_track<P: Propagator + ?Sized>(
    propagator: &P,
    catalog_id: u32,
    elements: &ElementSet,
    settings: &TrackSettings,
    start: DateTime<Utc>,
) -> Result<Track, TrackError> {
    let period = orbital_period(propagator.mean_motion(elements))?;
    let raw = sample_ground_track(propagator, elements, period, settings.samples, start)?;
    let unwrapped = unwrap_longitudes(&raw);
    let segments = split_segments(&unwrapped, settings.split_threshold_deg);

    log::debug!(
        "track for {}: {} samples in {} segments",
        catalog_id,
        raw.len(),
        segments.len()
    );

    Ok(Track {
        catalog_id,
        start,
        period_minutes: period.num_milliseconds() as f64 / 60_000.0,
        segments,
    })
}
