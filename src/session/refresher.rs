use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;

use super::object::{marker_label, CurrentPosition, ElementState};
use super::surface::RenderSurface;
use super::Session;
use crate::propagate::Propagator;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(5000);

/// Outcome of one refresh tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub published: usize,
    pub skipped: usize,
    pub failed: Vec<u32>,
}

impl<P: Propagator, S: RenderSurface> Session<P, S> {
    /// Propagates every active object to `now` and publishes its marker.
    /// Idle objects are skipped; a failing object does not affect the others.
    pub fn refresh(&mut self, now: DateTime<Utc>) -> RefreshReport {
        let mut report = RefreshReport::default();
        self.refreshes += 1;

        for object in &mut self.objects {
            let elements = match object.state() {
                ElementState::Active(elements) => elements,
                ElementState::Idle => {
                    report.skipped += 1;
                    continue;
                }
            };

            match self.propagator.locate(elements, now) {
                Ok(geo) => {
                    let label = marker_label(&object.label, geo.latitude_deg, geo.longitude_deg);
                    self.surface.upsert_marker(
                        object.catalog_id,
                        geo.latitude_deg,
                        geo.longitude_deg,
                        &label,
                        &object.color,
                    );
                    object.publish(CurrentPosition {
                        latitude_deg: geo.latitude_deg,
                        longitude_deg: geo.longitude_deg,
                        label,
                        updated_at: now,
                    });
                    report.published += 1;
                }
                Err(e) => {
                    log::warn!("Position refresh failed for {}: {}", object.label, e);
                    report.failed.push(object.catalog_id);
                }
            }
        }

        report
    }
}

/// Refreshes positions immediately and then every `interval`, for as long
/// as the session lives.
pub async fn run_refresh_loop<P, S>(session: Arc<Mutex<Session<P, S>>>, interval: Duration)
where
    P: Propagator + Send + 'static,
    S: RenderSurface + Send + 'static,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let mut session = session.lock().await;
        let report = session.refresh(Utc::now());
        log::debug!(
            "refresh {}: {} published, {} idle, {} failed",
            session.refresh_count(),
            report.published,
            report.skipped,
            report.failed.len()
        );
    }
}
