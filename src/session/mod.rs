mod object;
mod refresher;
mod surface;

use chrono::{DateTime, Utc};

use crate::fetch::RetrievalError;
use crate::groundtrack::{compute_track, Track, TrackError, TrackSettings};
use crate::propagate::{ElementSet, Propagator};

pub use object::{marker_label, CurrentPosition, ElementState, TrackedObject};
pub use refresher::{run_refresh_loop, RefreshReport, DEFAULT_REFRESH_INTERVAL};
pub use surface::{Marker, Polyline, RenderSurface, Scene};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetrievalSummary {
    pub active: usize,
    pub idle: usize,
}

/// Result of selecting an object for display.
#[derive(Debug)]
pub struct Selection {
    pub track: Track,
    pub marker: Option<CurrentPosition>,
}

/// All state of one viewing session: the tracked objects, the displayed
/// track and the surface everything is drawn on.
pub struct Session<P, S> {
    objects: Vec<TrackedObject>,
    propagator: P,
    surface: S,
    settings: TrackSettings,
    selected: Option<u32>,
    refreshes: u64,
}

impl<P: Propagator, S: RenderSurface> Session<P, S> {
    pub fn new(
        objects: Vec<TrackedObject>,
        propagator: P,
        surface: S,
        settings: TrackSettings,
    ) -> Self {
        Self {
            objects,
            propagator,
            surface,
            settings,
            selected: None,
            refreshes: 0,
        }
    }

    pub fn objects(&self) -> &[TrackedObject] {
        &self.objects
    }

    pub fn object(&self, catalog_id: u32) -> Option<&TrackedObject> {
        self.objects.iter().find(|o| o.catalog_id == catalog_id)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn selected(&self) -> Option<u32> {
        self.selected
    }

    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    pub fn catalog_ids(&self) -> Vec<u32> {
        self.objects.iter().map(|o| o.catalog_id).collect()
    }

    /// Moves an object from Idle to Active.
    pub fn assign(&mut self, catalog_id: u32, set: ElementSet) -> Result<(), TrackError> {
        let object = self
            .objects
            .iter_mut()
            .find(|o| o.catalog_id == catalog_id)
            .ok_or(TrackError::UnknownObject(catalog_id))?;

        if object.activate(set).is_err() {
            log::warn!(
                "{} already has an element set, keeping the first one",
                object.label
            );
        }
        Ok(())
    }

    /// Applies settled retrievals. Failed objects stay Idle.
    pub fn apply_retrievals(
        &mut self,
        results: Vec<(u32, Result<ElementSet, RetrievalError>)>,
    ) -> RetrievalSummary {
        for (catalog_id, result) in results {
            let outcome = match result {
                Ok(set) => self.assign(catalog_id, set),
                Err(e) => {
                    let label = self
                        .object(catalog_id)
                        .map_or_else(|| catalog_id.to_string(), |o| o.label.clone());
                    log::warn!("Failed TLE for {}: {}", label, e);
                    Ok(())
                }
            };
            if let Err(e) = outcome {
                log::warn!("Discarding element set: {}", e);
            }
        }

        let active = self.objects.iter().filter(|o| o.is_active()).count();
        let summary = RetrievalSummary {
            active,
            idle: self.objects.len() - active,
        };
        log::info!(
            "Element sets ready: {} active, {} idle",
            summary.active,
            summary.idle
        );
        summary
    }

    /// Computes a fresh track for `catalog_id` and replaces whatever track is
    /// on the surface. The previous track is removed even when the new one
    /// cannot be computed.
    pub fn select(&mut self, catalog_id: u32, now: DateTime<Utc>) -> Result<Selection, TrackError> {
        let object = self
            .objects
            .iter()
            .find(|o| o.catalog_id == catalog_id)
            .ok_or(TrackError::UnknownObject(catalog_id))?;

        let computed = match object.elements() {
            Some(set) => compute_track(&self.propagator, catalog_id, set, &self.settings, now),
            None => Err(TrackError::NotActive(catalog_id)),
        };

        self.surface.remove_all_track_segments();
        self.selected = Some(catalog_id);

        match computed {
            Ok(track) => {
                self.surface.draw_segments(&track.segments, &object.color);
                Ok(Selection {
                    track,
                    marker: object.position().cloned(),
                })
            }
            Err(e) => {
                log::warn!("No track for {}: {}", object.label, e);
                Err(e)
            }
        }
    }
}
