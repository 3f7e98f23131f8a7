use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::propagate::ElementSet;

#[derive(Debug, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ElementState {
    Idle,
    Active(ElementSet),
}

/// Most recently published point for one object.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CurrentPosition {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub label: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct TrackedObject {
    pub catalog_id: u32,
    pub label: String,
    pub color: String,
    state: ElementState,
    position: Option<CurrentPosition>,
}

impl TrackedObject {
    pub fn new(catalog_id: u32, label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            catalog_id,
            label: label.into(),
            color: color.into(),
            state: ElementState::Idle,
            position: None,
        }
    }

    pub fn state(&self) -> &ElementState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ElementState::Active(_))
    }

    pub fn elements(&self) -> Option<&ElementSet> {
        match &self.state {
            ElementState::Active(set) => Some(set),
            ElementState::Idle => None,
        }
    }

    pub fn position(&self) -> Option<&CurrentPosition> {
        self.position.as_ref()
    }

    /// Idle -> Active. An already active object keeps its element set and
    /// the rejected one is handed back.
    pub fn activate(&mut self, set: ElementSet) -> Result<(), ElementSet> {
        match self.state {
            ElementState::Idle => {
                self.state = ElementState::Active(set);
                Ok(())
            }
            ElementState::Active(_) => Err(set),
        }
    }

    pub(crate) fn publish(&mut self, position: CurrentPosition) {
        self.position = Some(position);
    }
}

pub fn marker_label(name: &str, latitude_deg: f64, longitude_deg: f64) -> String {
    format!(
        "{}\nLat: {:.2}, Lon: {:.2}",
        name, latitude_deg, longitude_deg
    )
}
