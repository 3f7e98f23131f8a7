mod elements;
mod error;
mod orbit;
mod parsing;

#[cfg(test)]
pub(crate) mod fixtures;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::groundtrack::TrackError;

pub use elements::ElementSet;
pub use error::ElementSetError;
pub use orbit::Sgp4Propagator;
pub use parsing::{parse_multi_tle, parse_tle_lines};

/// Earth-centered inertial (TEME) position in kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EciPosition {
    pub position_km: [f64; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Geodetic {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

/// Turns element sets and timestamps into positions over the earth.
pub trait Propagator {
    fn propagate(&self, elements: &ElementSet, at: DateTime<Utc>)
        -> Result<EciPosition, TrackError>;

    fn to_geodetic(&self, position: &EciPosition, at: DateTime<Utc>)
        -> Result<Geodetic, TrackError>;

    /// Mean motion in radians per minute.
    fn mean_motion(&self, elements: &ElementSet) -> f64;

    fn locate(&self, elements: &ElementSet, at: DateTime<Utc>) -> Result<Geodetic, TrackError> {
        let position = self.propagate(elements, at)?;
        self.to_geodetic(&position, at)
    }
}
