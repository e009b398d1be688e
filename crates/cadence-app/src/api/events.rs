use chrono::{DateTime, Utc};
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::middleware::auth::{AuthMiddleware, get_current_user};
use crate::state::get_state_from_depot;
use cadence_core::constants::EVENTS_ROUTE_COMPONENT;
use cadence_core::event::Recurrence;
use cadence_service::error::ServiceError;
use cadence_service::events::service::{self as events, CreateEventInput, EVENT_NOT_FOUND};

/// ## Summary
/// Error response payload for event endpoints
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// ## Summary
/// Event creation request payload. `recurrence` defaults to `NONE` when
/// omitted.
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub start_datetime: DateTime<Utc>,
    pub duration: i32,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub recurrence_end: Option<DateTime<Utc>>,
}

/// ## Summary
/// GET /events - List the caller's events as a 30-day calendar window
///
/// Returns a map of exactly 30 consecutive dates starting today, each
/// holding the expanded occurrences falling on that date.
///
/// ## Errors
/// Returns HTTP 500 if the listing fails
#[handler]
async fn list_events_handler(depot: &mut Depot, res: &mut Response) {
    let Ok(user) = get_current_user(depot) else {
        res.status_code(StatusCode::UNAUTHORIZED);
        res.render(Json(ErrorResponse {
            error: "Authentication required".to_string(),
        }));
        return;
    };

    let state = match get_state_from_depot(depot) {
        Ok(s) => s,
        Err(e) => {
            error!(error = ?e, "Failed to get application state");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Internal server error".to_string(),
            }));
            return;
        }
    };

    match events::list_events(state.events.as_ref(), user.id, Utc::now()).await {
        Ok(window) => {
            res.render(Json(window));
        }
        Err(e) => {
            error!(error = ?e, "Failed to list events");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Internal server error".to_string(),
            }));
        }
    }
}

/// ## Summary
/// POST /events - Create a new event owned by the caller
///
/// ## Side Effects
/// - Persists the event row
/// - Dispatches a creation notification in the background
///
/// ## Errors
/// Returns HTTP 400 on a validation failure or occurrence conflict
/// Returns HTTP 500 if persistence fails
#[handler]
async fn create_event_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    tracing::debug!("Processing event creation request");

    let Ok(user) = get_current_user(depot) else {
        res.status_code(StatusCode::UNAUTHORIZED);
        res.render(Json(ErrorResponse {
            error: "Authentication required".to_string(),
        }));
        return;
    };

    let create_req: CreateEventRequest = match req.parse_json().await {
        Ok(r) => r,
        Err(e) => {
            error!(error = ?e, "Failed to parse event creation request");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: "Invalid request body".to_string(),
            }));
            return;
        }
    };

    let state = match get_state_from_depot(depot) {
        Ok(s) => s,
        Err(e) => {
            error!(error = ?e, "Failed to get application state");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Internal server error".to_string(),
            }));
            return;
        }
    };

    let input = CreateEventInput {
        title: create_req.title,
        start_at: create_req.start_datetime,
        duration_minutes: create_req.duration,
        recurrence: create_req.recurrence,
        recurrence_end: create_req.recurrence_end,
    };

    match events::create_event(state.events.as_ref(), &state.notifications, &user, input).await {
        Ok(event) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(event));
        }
        Err(ServiceError::ValidationError(error) | ServiceError::Conflict(error)) => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse { error }));
        }
        Err(e) => {
            error!(error = ?e, "Failed to create event");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Internal server error".to_string(),
            }));
        }
    }
}

/// ## Summary
/// DELETE /events/&lt;id&gt; - Delete an event the caller owns
///
/// A malformed id, an unknown id, and another user's event are all
/// reported identically.
///
/// ## Errors
/// Returns HTTP 404 if no owned event matches the id
/// Returns HTTP 500 if the delete fails
#[handler]
async fn delete_event_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Ok(user) = get_current_user(depot) else {
        res.status_code(StatusCode::UNAUTHORIZED);
        res.render(Json(ErrorResponse {
            error: "Authentication required".to_string(),
        }));
        return;
    };

    let Some(id_str) = req.param::<String>("id") else {
        res.status_code(StatusCode::NOT_FOUND);
        res.render(Json(ErrorResponse {
            error: EVENT_NOT_FOUND.to_string(),
        }));
        return;
    };

    let Ok(event_id) = Uuid::parse_str(&id_str) else {
        res.status_code(StatusCode::NOT_FOUND);
        res.render(Json(ErrorResponse {
            error: EVENT_NOT_FOUND.to_string(),
        }));
        return;
    };

    let state = match get_state_from_depot(depot) {
        Ok(s) => s,
        Err(e) => {
            error!(error = ?e, "Failed to get application state");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Internal server error".to_string(),
            }));
            return;
        }
    };

    match events::delete_event(state.events.as_ref(), user.id, event_id).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(ServiceError::NotFound(error)) => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Json(ErrorResponse { error }));
        }
        Err(e) => {
            error!(error = ?e, "Failed to delete event");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Internal server error".to_string(),
            }));
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(EVENTS_ROUTE_COMPONENT)
        .hoop(AuthMiddleware)
        .get(list_events_handler)
        .post(create_event_handler)
        .push(Router::with_path("{id}").delete(delete_event_handler))
}
