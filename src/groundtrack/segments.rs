use super::types::{GeodeticSample, Segment};

/// Maps a longitude into the display range [-180, 180).
///
/// Values already in range are returned unchanged.
pub fn rewrap_longitude(longitude_deg: f64) -> f64 {
    if (-180.0..180.0).contains(&longitude_deg) {
        return longitude_deg;
    }
    let reduced = (longitude_deg + 180.0).rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if reduced >= 360.0 {
        -180.0
    } else {
        reduced - 180.0
    }
}

/// Re-wraps an unwrapped longitude sequence into display space and cuts it
/// wherever consecutive display longitudes jump by more than
/// `threshold_deg`. An empty input yields no segments.
pub fn split_segments(unwrapped: &[GeodeticSample], threshold_deg: f64) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = Segment::default();

    for sample in unwrapped {
        let point = sample.with_longitude(rewrap_longitude(sample.longitude_deg));
        if let Some(prev) = current.last_longitude() {
            if (point.longitude_deg - prev).abs() > threshold_deg {
                segments.push(std::mem::take(&mut current));
            }
        }
        current.points.push(point);
    }

    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
