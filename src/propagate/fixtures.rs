use chrono::{DateTime, TimeZone, Utc};
use std::cell::Cell;
use std::f64::consts::TAU;

use super::{ElementSet, EciPosition, Geodetic, Propagator};
use crate::groundtrack::TrackError;

pub const ISS_LINES: [&str; 3] = [
    "ISS (ZARYA)",
    "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927",
    "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537",
];

pub const HUBBLE_LINES: [&str; 3] = [
    "HST",
    "1 20580U 90037B   20194.51178843  .00000785  00000-0  37476-4 0  9998",
    "2 20580  28.4693 128.3316 0002824 340.1440  97.6937 15.09280063457545",
];

pub fn iss() -> ElementSet {
    ElementSet::from_tle(&ISS_LINES.join("\n")).unwrap()
}

pub fn hubble() -> ElementSet {
    ElementSet::from_tle(&HUBBLE_LINES.join("\n")).unwrap()
}

pub fn fixture_epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

const RADIUS_KM: f64 = 6800.0;

/// Moves every object along the equator-ish at a fixed longitude rate,
/// measured from `fixture_epoch()`.
pub struct ScriptedPropagator {
    start_lon_deg: f64,
    rate_deg_min: f64,
    mean_motion: f64,
    failing_after: Option<DateTime<Utc>>,
    fail_at: Vec<(u64, DateTime<Utc>)>,
    calls: Cell<usize>,
}

impl ScriptedPropagator {
    pub fn linear(start_lon_deg: f64, rate_deg_min: f64) -> Self {
        Self {
            start_lon_deg,
            rate_deg_min,
            mean_motion: TAU / 92.0,
            failing_after: None,
            fail_at: Vec::new(),
            calls: Cell::new(0),
        }
    }

    pub fn with_mean_motion(mut self, mean_motion: f64) -> Self {
        self.mean_motion = mean_motion;
        self
    }

    pub fn with_period_minutes(self, minutes: f64) -> Self {
        self.with_mean_motion(TAU / minutes)
    }

    /// Fails every propagation at or after `at`.
    pub fn failing_after(mut self, at: DateTime<Utc>) -> Self {
        self.failing_after = Some(at);
        self
    }

    /// Fails propagation of one catalog object at exactly `at`.
    pub fn failing_once(mut self, catalog_id: u64, at: DateTime<Utc>) -> Self {
        self.fail_at.push((catalog_id, at));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn position_at(&self, at: DateTime<Utc>) -> Geodetic {
        let minutes = (at - fixture_epoch()).num_milliseconds() as f64 / 60_000.0;
        let lon = self.start_lon_deg + self.rate_deg_min * minutes;
        Geodetic {
            latitude_deg: 30.0 * (minutes / 15.0).sin(),
            longitude_deg: (lon + 180.0).rem_euclid(360.0) - 180.0,
        }
    }
}

impl Propagator for ScriptedPropagator {
    fn propagate(
        &self,
        elements: &ElementSet,
        at: DateTime<Utc>,
    ) -> Result<EciPosition, TrackError> {
        self.calls.set(self.calls.get() + 1);
        if self.failing_after.is_some_and(|limit| at >= limit)
            || self.fail_at.contains(&(elements.catalog_id(), at))
        {
            return Err(TrackError::Propagation(format!(
                "scripted failure for {} at {}",
                elements.catalog_id(),
                at
            )));
        }

        let geo = self.position_at(at);
        let (lat, lon) = (geo.latitude_deg.to_radians(), geo.longitude_deg.to_radians());
        Ok(EciPosition {
            position_km: [
                RADIUS_KM * lat.cos() * lon.cos(),
                RADIUS_KM * lat.cos() * lon.sin(),
                RADIUS_KM * lat.sin(),
            ],
        })
    }

    fn to_geodetic(
        &self,
        position: &EciPosition,
        _at: DateTime<Utc>,
    ) -> Result<Geodetic, TrackError> {
        let [x, y, z] = position.position_km;
        Ok(Geodetic {
            latitude_deg: (z / RADIUS_KM).asin().to_degrees(),
            longitude_deg: y.atan2(x).to_degrees(),
        })
    }

    fn mean_motion(&self, _elements: &ElementSet) -> f64 {
        self.mean_motion
    }
}
