use chrono::{DateTime, Duration, Utc};

use super::error::TrackError;
use super::types::GeodeticSample;
use crate::propagate::{ElementSet, Propagator};

/// Samples `samples + 1` points evenly over `period`, both endpoints included.
///
/// Any propagation failure discards the whole sequence.
pub fn sample_ground_track<P: Propagator + ?Sized>(
    propagator: &P,
    elements: &ElementSet,
    period: Duration,
    samples: usize,
    start: DateTime<Utc>,
) -> Result<Vec<GeodeticSample>, TrackError> {
    if samples == 0 {
        return Err(TrackError::InvalidElementSet(
            "sample count must be at least 1".into(),
        ));
    }

    let period_ms = period.num_milliseconds() as f64;
    (0..=samples)
        .map(|index| -> Result<GeodeticSample, TrackError> {
            let offset = (period_ms * index as f64 / samples as f64).round() as i64;
            let timestamp = start + Duration::milliseconds(offset);
            let geo = propagator.locate(elements, timestamp)?;
            Ok(GeodeticSample {
                index,
                timestamp,
                latitude_deg: geo.latitude_deg,
                longitude_deg: geo.longitude_deg,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagate::fixtures::{iss, ScriptedPropagator};
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn closes_after_one_period() {
        let propagator = ScriptedPropagator::linear(-170.0, 4.0);
        let period = Duration::minutes(90);
        let samples = sample_ground_track(&propagator, &iss(), period, 360, start()).unwrap();

        assert_eq!(samples.len(), 361);
        assert_eq!(samples[0].timestamp, start());
        assert_eq!(samples[360].timestamp, start() + period);
        assert_eq!(samples[180].timestamp, start() + Duration::minutes(45));
        assert!(samples.iter().enumerate().all(|(i, s)| s.index == i));
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let propagator = ScriptedPropagator::linear(10.0, 1.5);
        let period = Duration::minutes(95);
        let a = sample_ground_track(&propagator, &iss(), period, 24, start()).unwrap();
        let b = sample_ground_track(&propagator, &iss(), period, 24, start()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn single_failure_discards_everything() {
        let propagator =
            ScriptedPropagator::linear(0.0, 1.0).failing_after(start() + Duration::minutes(30));
        let result =
            sample_ground_track(&propagator, &iss(), Duration::minutes(90), 12, start());
        assert!(matches!(result, Err(TrackError::Propagation(_))));
    }

    #[test]
    fn zero_samples_rejected() {
        let propagator = ScriptedPropagator::linear(0.0, 1.0);
        let result = sample_ground_track(&propagator, &iss(), Duration::minutes(90), 0, start());
        assert!(result.is_err());
    }
}
