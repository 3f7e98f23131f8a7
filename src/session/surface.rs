use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

use crate::groundtrack::Segment;

pub const TRACK_WEIGHT: u32 = 3;
pub const TRACK_OPACITY: f64 = 0.9;
pub const MARKER_RADIUS: u32 = 6;
pub const MARKER_FILL_OPACITY: f64 = 1.0;

/// Where tracks and markers end up.
pub trait RenderSurface {
    fn draw_segments(&mut self, segments: &[Segment], color: &str);
    fn upsert_marker(
        &mut self,
        catalog_id: u32,
        latitude_deg: f64,
        longitude_deg: f64,
        label: &str,
        color: &str,
    );
    fn remove_all_track_segments(&mut self);
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Polyline {
    pub color: String,
    pub weight: u32,
    pub opacity: f64,
    pub segment: Segment,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Marker {
    pub catalog_id: u32,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub label: String,
    pub color: String,
    pub radius: u32,
    pub fill_opacity: f64,
}

/// In-memory surface; the web layer serves it as JSON.
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct Scene {
    pub revision: u64,
    pub polylines: Vec<Polyline>,
    pub markers: BTreeMap<u32, Marker>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurface for Scene {
    fn draw_segments(&mut self, segments: &[Segment], color: &str) {
        self.polylines.extend(segments.iter().map(|segment| Polyline {
            color: color.to_string(),
            weight: TRACK_WEIGHT,
            opacity: TRACK_OPACITY,
            segment: segment.clone(),
        }));
        self.revision += 1;
    }

    fn upsert_marker(
        &mut self,
        catalog_id: u32,
        latitude_deg: f64,
        longitude_deg: f64,
        label: &str,
        color: &str,
    ) {
        self.markers
            .entry(catalog_id)
            .and_modify(|marker| {
                marker.latitude_deg = latitude_deg;
                marker.longitude_deg = longitude_deg;
                marker.label = label.to_string();
            })
            .or_insert_with(|| Marker {
                catalog_id,
                latitude_deg,
                longitude_deg,
                label: label.to_string(),
                color: color.to_string(),
                radius: MARKER_RADIUS,
                fill_opacity: MARKER_FILL_OPACITY,
            });
        self.revision += 1;
    }

    fn remove_all_track_segments(&mut self) {
        self.polylines.clear();
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::groundtrack::fixtures::samples_from_longitudes;

    #[test]
    fn markers_are_created_then_updated_in_place() {
        let mut scene = Scene::new();
        scene.upsert_marker(7, 1.0, 2.0, "a", "red");
        scene.upsert_marker(7, 3.0, 4.0, "b", "red");

        assert_eq!(scene.markers.len(), 1);
        let marker = &scene.markers[&7];
        assert_eq!((marker.latitude_deg, marker.longitude_deg), (3.0, 4.0));
        assert_eq!(marker.label, "b");
        assert_eq!(marker.color, "red");
        assert_eq!(marker.radius, 6);
        assert_eq!(marker.fill_opacity, 1.0);
    }

    #[test]
    fn segments_are_styled_and_cleared() {
        let mut scene = Scene::new();
        let segment = Segment {
            points: samples_from_longitudes(&[1.0, 2.0]),
        };
        scene.draw_segments(&[segment.clone(), segment], "blue");
        assert_eq!(scene.polylines.len(), 2);
        assert!(scene.polylines.iter().all(|p| p.color == "blue" && p.weight == 3));

        scene.upsert_marker(1, 0.0, 0.0, "x", "green");
        scene.remove_all_track_segments();
        assert!(scene.polylines.is_empty());
        assert_eq!(scene.markers.len(), 1);
        assert_eq!(scene.revision, 3);
    }
}
