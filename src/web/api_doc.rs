use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::satellites::{SatelliteSummary, SelectionResponse, TrackResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::satellites::list,
        super::api::satellites::select,
        super::api::satellites::track,
        super::api::satellites::positions,
    ),
    components(
        schemas(
            SatelliteSummary,
            SelectionResponse,
            TrackResponse,
            ErrorResponse,
            crate::groundtrack::Track,
            crate::groundtrack::Segment,
            crate::groundtrack::GeodeticSample,
            crate::session::CurrentPosition,
            crate::session::Marker,
            crate::session::Polyline,
        )
    ),
    info(
        title = "Groundtrack API",
        description = "Live ground tracks and positions of tracked satellites",
        version = "0.1.0"
    ),
    tags(
        (name = "satellites", description = "Tracked objects and selection"),
        (name = "map", description = "Displayed track and markers")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/satellites",
            "/api/satellites/{id}/select",
            "/api/track",
            "/api/positions",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
