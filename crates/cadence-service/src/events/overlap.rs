//! Conflict detection: a creation candidate is rejected when any of its
//! occurrence instants exactly equals the start of an event the user
//! already owns.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::events::recurrence::{Schedule, Window};
use crate::events::validate::RECURRENCE_END_REQUIRED;
use cadence_core::event::Recurrence;
use cadence_core::store::EventStore;

/// ## Summary
/// Returns the first conflicting occurrence instant, if any.
///
/// A non-recurring candidate probes the store once for its exact start
/// instant. A recurring candidate is expanded over its full requested
/// range `[start_at, recurrence_end]` - deliberately unbounded by the
/// 30-day listing window - and each instant is probed through
/// `find_by_owner_and_start`. Only the calling user's events are
/// considered; duration plays no part.
///
/// ## Errors
/// Returns a validation error for an inconsistent schedule, or a store
/// error if a lookup fails.
#[tracing::instrument(skip(store), fields(owner_id = %owner_id))]
pub async fn find_conflict(
    store: &dyn EventStore,
    owner_id: Uuid,
    start_at: DateTime<Utc>,
    recurrence: Recurrence,
    recurrence_end: Option<DateTime<Utc>>,
) -> ServiceResult<Option<DateTime<Utc>>> {
    if recurrence == Recurrence::None {
        let existing = store.find_by_owner_and_start(owner_id, start_at).await?;
        return Ok(existing.map(|event| event.start_at));
    }

    let Some(end) = recurrence_end else {
        return Err(ServiceError::ValidationError(
            RECURRENCE_END_REQUIRED.to_string(),
        ));
    };

    let schedule = Schedule {
        start_at,
        recurrence,
        recurrence_end,
    };
    for instant in schedule.occurrences_within(&Window::new(start_at, end))? {
        if store
            .find_by_owner_and_start(owner_id, instant)
            .await?
            .is_some()
        {
            tracing::debug!(conflict_at = %instant, "Found conflicting occurrence");
            return Ok(Some(instant));
        }
    }

    Ok(None)
}
