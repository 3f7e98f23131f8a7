use chrono::NaiveDateTime;
use sgp4::{Constants, Elements};
use std::fmt;

use super::error::ElementSetError;
use super::parsing::parse_tle_lines;

/// Parsed orbital elements together with the SGP4 constants derived from them.
pub struct ElementSet {
    elements: Elements,
    constants: Constants,
}

impl ElementSet {
    pub fn from_tle(tle: &str) -> Result<Self, ElementSetError> {
        let (name, line1, line2) = parse_tle_lines(tle)?;
        Self::from_lines(name, &line1, &line2)
    }

    pub fn from_lines(
        name: Option<String>,
        line1: &str,
        line2: &str,
    ) -> Result<Self, ElementSetError> {
        let elements = Elements::from_tle(name, line1.as_bytes(), line2.as_bytes())?;
        let constants = Constants::from_elements(&elements)?;
        Ok(Self {
            elements,
            constants,
        })
    }

    pub fn catalog_id(&self) -> u64 {
        self.elements.norad_id
    }

    pub fn name(&self) -> Option<&str> {
        self.elements.object_name.as_deref()
    }

    pub fn epoch(&self) -> NaiveDateTime {
        self.elements.datetime
    }

    /// Mean motion as published in the element set.
    pub fn revolutions_per_day(&self) -> f64 {
        self.elements.mean_motion
    }

    pub(crate) fn elements(&self) -> &Elements {
        &self.elements
    }

    pub(crate) fn constants(&self) -> &Constants {
        &self.constants
    }
}

impl fmt::Debug for ElementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementSet")
            .field("catalog_id", &self.catalog_id())
            .field("name", &self.name())
            .field("epoch", &self.epoch())
            .field("revolutions_per_day", &self.revolutions_per_day())
            .finish()
    }
}
