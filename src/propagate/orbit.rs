use chrono::{DateTime, Utc};
use std::f64::consts::TAU;

use super::{ElementSet, EciPosition, Geodetic, Propagator};
use crate::groundtrack::TrackError;

const MINUTES_PER_DAY: f64 = 1440.0;

// WGS-84
const EARTH_A_KM: f64 = 6378.137;
const EARTH_E2: f64 = 0.006_694_379_990_14;

/// Propagation adapter backed by the `sgp4` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sgp4Propagator;

impl Propagator for Sgp4Propagator {
    fn propagate(
        &self,
        elements: &ElementSet,
        at: DateTime<Utc>,
    ) -> Result<EciPosition, TrackError> {
        let minutes = elements
            .elements()
            .datetime_to_minutes_since_epoch(&at.naive_utc())
            .map_err(|e| TrackError::Propagation(e.to_string()))?;

        let prediction = elements.constants().propagate(minutes)?;

        Ok(EciPosition {
            position_km: prediction.position,
        })
    }

    fn to_geodetic(
        &self,
        position: &EciPosition,
        at: DateTime<Utc>,
    ) -> Result<Geodetic, TrackError> {
        let sidereal =
            sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&at.naive_utc()));
        ecef_to_geodetic(teme_to_ecef_position(position.position_km, sidereal))
    }

    fn mean_motion(&self, elements: &ElementSet) -> f64 {
        elements.revolutions_per_day() * TAU / MINUTES_PER_DAY
    }
}

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

/// Geodetic latitude/longitude on the WGS-84 ellipsoid (Bowring iteration).
pub fn ecef_to_geodetic(ecef_km: [f64; 3]) -> Result<Geodetic, TrackError> {
    let [x, y, z] = ecef_km;
    if !(x.is_finite() && y.is_finite() && z.is_finite()) {
        return Err(TrackError::Propagation("non-finite position".into()));
    }

    let p = (x * x + y * y).sqrt();
    if p == 0.0 && z == 0.0 {
        return Err(TrackError::Propagation("position at earth center".into()));
    }

    let mut lat = z.atan2(p * (1.0 - EARTH_E2));
    for _ in 0..5 {
        let sin_lat = lat.sin();
        let n = EARTH_A_KM / (1.0 - EARTH_E2 * sin_lat * sin_lat).sqrt();
        lat = (z + EARTH_E2 * n * sin_lat).atan2(p);
    }

    Ok(Geodetic {
        latitude_deg: lat.to_degrees(),
        longitude_deg: y.atan2(x).to_degrees(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groundtrack::{
        compute_track, orbital_period, sample_ground_track, unwrap_longitudes, TrackSettings,
    };
    use crate::propagate::fixtures::{hubble, iss};
    use chrono::{Duration, TimeZone};

    fn iss_epoch() -> DateTime<Utc> {
        // 08264.51782528
        Utc.with_ymd_and_hms(2008, 9, 20, 12, 25, 40).unwrap()
    }

    #[test]
    fn mean_motion_in_radians_per_minute() {
        let mm = Sgp4Propagator.mean_motion(&iss());
        assert!((mm - 15.72125391 * TAU / 1440.0).abs() < 1e-9);
        let period = orbital_period(mm).unwrap();
        // ~91.6 minutes
        assert!((period.num_seconds() - 5496).abs() <= 2, "{}", period.num_seconds());
    }

    #[test]
    fn geodetic_axes() {
        let equator = ecef_to_geodetic([7000.0, 0.0, 0.0]).unwrap();
        assert!(equator.latitude_deg.abs() < 1e-12);
        assert!(equator.longitude_deg.abs() < 1e-12);

        let east = ecef_to_geodetic([0.0, 7000.0, 0.0]).unwrap();
        assert!((east.longitude_deg - 90.0).abs() < 1e-12);

        let pole = ecef_to_geodetic([0.0, 0.0, 7000.0]).unwrap();
        assert!((pole.latitude_deg - 90.0).abs() < 1e-9);

        assert!(ecef_to_geodetic([0.0, 0.0, 0.0]).is_err());
        assert!(ecef_to_geodetic([f64::NAN, 0.0, 0.0]).is_err());
    }

    #[test]
    fn teme_rotation_preserves_radius() {
        let pos = [4000.0, -3000.0, 4500.0];
        let ecef = teme_to_ecef_position(pos, 1.234);
        let r = |v: [f64; 3]| (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        assert!((r(pos) - r(ecef)).abs() < 1e-9);
        assert_eq!(ecef[2], pos[2]);
    }

    #[test]
    fn iss_stays_below_its_inclination() {
        let set = iss();
        let start = iss_epoch();
        for minutes in (0..120).step_by(5) {
            let geo = Sgp4Propagator
                .locate(&set, start + Duration::minutes(minutes))
                .unwrap();
            assert!(geo.latitude_deg.abs() < 52.5, "{:?}", geo);
            assert!((-180.0..=180.0).contains(&geo.longitude_deg));
        }
    }

    #[test]
    fn one_revolution_drifts_west_by_earth_rotation() {
        let set = iss();
        let period = orbital_period(Sgp4Propagator.mean_motion(&set)).unwrap();
        let raw = sample_ground_track(&Sgp4Propagator, &set, period, 360, iss_epoch()).unwrap();
        let unwrapped = unwrap_longitudes(&raw);
        let progress = unwrapped[360].longitude_deg - unwrapped[0].longitude_deg;
        // 360° minus roughly 23° of earth rotation during one ISS orbit
        assert!((325.0..350.0).contains(&progress), "progress {}", progress);
    }

    #[test]
    fn hubble_track_is_well_formed() {
        let start = Utc.with_ymd_and_hms(2020, 7, 12, 12, 0, 0).unwrap();
        let settings = TrackSettings::default();
        let track = compute_track(&Sgp4Propagator, 20580, &hubble(), &settings, start).unwrap();

        assert_eq!(track.sample_count(), settings.samples + 1);
        assert!(!track.segments.is_empty() && track.segments.len() <= 3);
        for point in track.segments.iter().flat_map(|s| &s.points) {
            assert!(point.latitude_deg.abs() < 29.5);
            assert!((-180.0..180.0).contains(&point.longitude_deg));
        }
    }
}
