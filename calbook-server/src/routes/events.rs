//! Event scheduling endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Deserialize;

use calbook_core::{
    InviteStatus, Notification, Occurrence, RepeatRule, export, ics, invitation, recurrence,
};

use crate::auth::CurrentUser;
use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_events).get(list_events))
        .route("/events/export", get(export_calendar))
        .route("/events/{id}", delete(delete_event))
        .route("/events/{id}/respond", post(respond_to_invite))
}

/// Request body for creating a (possibly repeating) event
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start: chrono::DateTime<chrono::Utc>,
    pub end: chrono::DateTime<chrono::Utc>,
    /// Invitee contact handles (email addresses).
    #[serde(default)]
    pub invited_users: Vec<String>,
    #[serde(default)]
    pub notification: Notification,
    #[serde(default)]
    pub repeat: RepeatRule,
    /// Id of the resource to book, if any.
    pub resource: Option<String>,
}

/// POST /events - Expand the repeat rule and persist the occurrence batch.
///
/// The store conflict-checks every expanded occurrence against the booked
/// resource while inserting, so either the whole series is created or
/// nothing is.
async fn create_events(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateEventRequest>,
) -> Result<Response, AppError> {
    let invited_users = invitation::resolve_invitees(&state.directory, &req.invited_users);
    let intervals = recurrence::expand(req.start, req.end, &req.repeat)?;

    let batch: Vec<Occurrence> = intervals
        .into_iter()
        .map(|(start, end)| {
            let mut occ = Occurrence::new(req.title.clone(), start, end, user.id.clone());
            occ.description = req.description.clone();
            occ.location = req.location.clone();
            occ.invited_users = invited_users.clone();
            occ.notification = req.notification;
            occ.repeat = req.repeat.clone();
            occ.resource = req.resource.clone();
            occ
        })
        .collect();

    let created = state.events.create_batch(batch, &state.resources)?;

    tracing::info!(
        owner = %user.id,
        occurrences = created.len(),
        "created event batch"
    );

    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// GET /events - Occurrences the caller owns or is invited to.
async fn list_events(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Occurrence>>, AppError> {
    Ok(Json(state.events.list_for_user(&user.id)))
}

/// DELETE /events/:id - Delete one occurrence (owner only).
///
/// Deleting a whole series takes one call per occurrence.
async fn delete_event(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.events.delete(&id, &user.id)?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

/// Request body for responding to an invitation
#[derive(Deserialize)]
pub struct RespondRequest {
    pub status: String,
}

/// POST /events/:id/respond - Record the caller's response on one occurrence.
async fn respond_to_invite(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<RespondRequest>,
) -> Result<Json<Occurrence>, AppError> {
    let status = InviteStatus::parse_response(&req.status)?;
    let updated = state.events.respond(&id, &user.id, status)?;
    Ok(Json(updated))
}

/// GET /events/export - The caller's visible occurrences as an ICS download.
async fn export_calendar(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Response, AppError> {
    let entries = export::entries_for_user(&state.events, &user.id);
    let feed = ics::generate_feed(&entries)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/calendar; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"calendar.ics\"",
            ),
        ],
        feed,
    )
        .into_response())
}
