//! Event lifecycle: validated, conflict-checked creation with a
//! background creation notice, windowed listing, and owner-scoped
//! deletion.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::events::overlap::find_conflict;
use crate::events::validate::{validate_duration, validate_recurrence, validate_title};
use crate::events::window::{EventOccurrence, build_window};
use crate::notify::NotificationSender;
use cadence_core::event::{Event, Recurrence};
use cadence_core::store::EventStore;
use cadence_core::user::User;

pub const CONFLICT_AT_EXACT_INSTANT: &str =
    "You already have an event scheduled at this exact date and time";
pub const EVENT_NOT_FOUND: &str = "Event not found or you don't have permission";

/// Creation payload as accepted from the API layer.
#[derive(Debug, Clone)]
pub struct CreateEventInput {
    pub title: String,
    pub start_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub recurrence: Recurrence,
    pub recurrence_end: Option<DateTime<Utc>>,
}

/// ## Summary
/// Creates an event owned by `user`.
///
/// The payload is validated, then every occurrence the new event would
/// produce is checked against the user's existing events; any shared
/// instant rejects the creation before anything is written. On success a
/// creation notice is dispatched in the background, so notification
/// failures never fail the already-committed event.
///
/// ## Errors
/// Returns a validation error for a bad payload, a conflict error when
/// an occurrence collides with an existing event, or a store error if
/// the write fails.
#[tracing::instrument(skip(store, sender, user, input), fields(owner_id = %user.id))]
pub async fn create_event(
    store: &dyn EventStore,
    sender: &NotificationSender,
    user: &User,
    input: CreateEventInput,
) -> ServiceResult<Event> {
    validate_title(&input.title)?;
    validate_duration(input.duration_minutes)?;
    validate_recurrence(input.recurrence, input.recurrence_end, input.start_at)?;

    let conflict = find_conflict(
        store,
        user.id,
        input.start_at,
        input.recurrence,
        input.recurrence_end,
    )
    .await?;
    if let Some(conflict_at) = conflict {
        let message = if input.recurrence == Recurrence::None {
            CONFLICT_AT_EXACT_INSTANT.to_string()
        } else {
            format!("You already have an event scheduled at {conflict_at}")
        };
        return Err(ServiceError::Conflict(message));
    }

    let event = Event {
        id: Uuid::now_v7(),
        title: input.title.trim().to_string(),
        start_at: input.start_at,
        duration_minutes: input.duration_minutes,
        recurrence: input.recurrence,
        recurrence_end: input.recurrence_end,
        owner_id: user.id,
        created_at: Utc::now(),
    };
    store.insert(&event).await?;
    tracing::info!(event_id = %event.id, recurrence = %event.recurrence, "Created event");

    sender.spawn_event_created(&event, &user.email);
    Ok(event)
}

/// ## Summary
/// Lists the owner's events as the 30-day bucketed calendar view
/// anchored at `now`.
///
/// ## Errors
/// Returns a store error if the listing fails, or a validation error if
/// a stored event cannot be expanded.
pub async fn list_events(
    store: &dyn EventStore,
    owner_id: Uuid,
    now: DateTime<Utc>,
) -> ServiceResult<BTreeMap<NaiveDate, Vec<EventOccurrence>>> {
    let events = store.list_by_owner(owner_id).await?;
    build_window(&events, now)
}

/// ## Summary
/// Deletes an event the caller owns.
///
/// ## Errors
/// Returns `NotFound` when no such event exists for this owner; a
/// foreign event id is indistinguishable from an unknown one.
#[tracing::instrument(skip(store))]
pub async fn delete_event(
    store: &dyn EventStore,
    owner_id: Uuid,
    event_id: Uuid,
) -> ServiceResult<()> {
    if store.delete_owned(event_id, owner_id).await? {
        tracing::info!(event_id = %event_id, "Deleted event");
        Ok(())
    } else {
        Err(ServiceError::NotFound(EVENT_NOT_FOUND.to_string()))
    }
}
