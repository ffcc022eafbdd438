//! Resource endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;

use calbook_core::{Occurrence, Resource};

use crate::auth::CurrentUser;
use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/resources", post(create_resource).get(list_resources))
        .route("/resources/{id}/calendar", get(resource_calendar))
}

/// Request body for registering a resource
#[derive(Deserialize)]
pub struct CreateResourceRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// POST /resources - Register a bookable resource.
async fn create_resource(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(req): Json<CreateResourceRequest>,
) -> Result<Response, AppError> {
    let resource = state.resources.create(Resource::new(req.name, req.kind))?;
    Ok((StatusCode::CREATED, Json(resource)).into_response())
}

/// GET /resources - List all registered resources.
async fn list_resources(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
) -> Result<Json<Vec<Resource>>, AppError> {
    Ok(Json(state.resources.list()))
}

/// GET /resources/:id/calendar - Every occurrence booked to one resource.
async fn resource_calendar(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<Occurrence>>, AppError> {
    state.resources.require(&id)?;
    Ok(Json(state.events.list_for_resource(&id)))
}
