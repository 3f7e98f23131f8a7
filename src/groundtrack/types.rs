use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_SAMPLES: usize = 360;
pub const DEFAULT_SPLIT_THRESHOLD_DEG: f64 = 90.0;

/// One propagated point of a ground track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct GeodeticSample {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeodeticSample {
    pub fn with_longitude(self, longitude_deg: f64) -> Self {
        Self {
            longitude_deg,
            ..self
        }
    }
}

/// A polyline that never crosses the display boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct Segment {
    pub points: Vec<GeodeticSample>,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_longitude(&self) -> Option<f64> {
        self.points.last().map(|p| p.longitude_deg)
    }
}

/// One revolution of ground track, ready for display.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Track {
    pub catalog_id: u32,
    pub start: DateTime<Utc>,
    pub period_minutes: f64,
    pub segments: Vec<Segment>,
}

impl Track {
    pub fn sample_count(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSettings {
    pub samples: usize,
    pub split_threshold_deg: f64,
}

impl Default for TrackSettings {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            split_threshold_deg: DEFAULT_SPLIT_THRESHOLD_DEG,
        }
    }
}
