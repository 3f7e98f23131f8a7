use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::groundtrack::Track;
use crate::session::{CurrentPosition, Marker, Polyline};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct SatelliteSummary {
    pub catalog_id: u32,
    pub name: String,
    pub color: String,
    pub state: String,
    pub position: Option<CurrentPosition>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SelectionResponse {
    pub track: Track,
    pub marker: Option<CurrentPosition>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrackResponse {
    pub selected: Option<u32>,
    pub revision: u64,
    pub polylines: Vec<Polyline>,
}

#[utoipa::path(
    get,
    path = "/api/satellites",
    responses(
        (status = 200, description = "Tracked objects in display order",
            body = Vec<SatelliteSummary>)
    ),
    tag = "satellites"
)]
pub async fn list(State(state): State<AppState>) -> Json<Vec<SatelliteSummary>> {
    let session = state.session.lock().await;
    let satellites = session
        .objects()
        .iter()
        .map(|o| SatelliteSummary {
            catalog_id: o.catalog_id,
            name: o.label.clone(),
            color: o.color.clone(),
            state: o.state().to_string(),
            position: o.position().cloned(),
        })
        .collect();
    Json(satellites)
}

#[utoipa::path(
    post,
    path = "/api/satellites/{id}/select",
    params(
        ("id" = u32, Path, description = "Catalog number")
    ),
    responses(
        (status = 200, description = "Track replaced", body = SelectionResponse),
        (status = 404, description = "Unknown object", body = ErrorResponse),
        (status = 409, description = "No element set yet", body = ErrorResponse),
        (status = 422, description = "Track could not be computed", body = ErrorResponse)
    ),
    tag = "satellites"
)]
pub async fn select(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<Json<SelectionResponse>> {
    let mut session = state.session.lock().await;
    let selection = session.select(id, Utc::now())?;
    Ok(Json(SelectionResponse {
        track: selection.track,
        marker: selection.marker,
    }))
}

#[utoipa::path(
    get,
    path = "/api/track",
    responses(
        (status = 200, description = "Currently displayed track", body = TrackResponse)
    ),
    tag = "map"
)]
pub async fn track(State(state): State<AppState>) -> Json<TrackResponse> {
    let session = state.session.lock().await;
    let scene = session.surface();
    Json(TrackResponse {
        selected: session.selected(),
        revision: scene.revision,
        polylines: scene.polylines.clone(),
    })
}

#[utoipa::path(
    get,
    path = "/api/positions",
    responses(
        (status = 200, description = "Current markers", body = Vec<Marker>)
    ),
    tag = "map"
)]
pub async fn positions(State(state): State<AppState>) -> Json<Vec<Marker>> {
    let session = state.session.lock().await;
    Json(session.surface().markers.values().cloned().collect())
}
