use super::types::GeodeticSample;

/// Smallest angular step from `from` to `to`, in (-180, 180].
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    180.0 - (180.0 - (to - from)).rem_euclid(360.0)
}

/// Removes the ±360° jumps the display range introduces into a longitude
/// sequence. The first sample seeds the accumulator and is never adjusted.
pub fn unwrap_longitudes(samples: &[GeodeticSample]) -> Vec<GeodeticSample> {
    samples
        .iter()
        .scan(None::<f64>, |previous, sample| {
            let longitude = match *previous {
                Some(prev) => prev + shortest_delta(prev, sample.longitude_deg),
                None => sample.longitude_deg,
            };
            *previous = Some(longitude);
            Some(sample.with_longitude(longitude))
        })
        .collect()
}
