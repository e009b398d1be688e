//! Calendar-window assembly: a day-bucketed view of the next thirty
//! days, each bucket holding the expanded occurrences of the user's
//! events.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::events::recurrence::{Schedule, Window};
use cadence_core::constants::WINDOW_DAYS;
use cadence_core::event::Event;

/// A single expanded occurrence as it appears in a listing bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventOccurrence {
    pub id: Uuid,
    pub title: String,
    pub start_datetime: DateTime<Utc>,
    pub duration: i32,
}

/// ## Summary
/// Builds the 30-day calendar view for the given events.
///
/// The map holds exactly [`WINDOW_DAYS`] keys, one per calendar date from
/// `now`'s UTC date onward, each initialized empty. Every event is
/// expanded over `[start of today, now + 30 days]` and its occurrences
/// are appended to the bucket for their date; an occurrence whose date
/// has no bucket (only possible for the `now + 30 days` boundary date)
/// is dropped. Buckets are sorted by occurrence instant.
///
/// ## Errors
/// Returns a validation error if a stored event fails to expand.
pub fn build_window(
    events: &[Event],
    now: DateTime<Utc>,
) -> ServiceResult<BTreeMap<NaiveDate, Vec<EventOccurrence>>> {
    let today = now.date_naive();
    let mut buckets: BTreeMap<NaiveDate, Vec<EventOccurrence>> = BTreeMap::new();
    for offset in 0..WINDOW_DAYS {
        buckets.insert(today + Duration::days(offset), Vec::new());
    }

    let start_of_today = today
        .and_hms_opt(0, 0, 0)
        .ok_or(ServiceError::InvariantViolation(
            "midnight is a valid time of day",
        ))?
        .and_utc();
    let window = Window::new(start_of_today, now + Duration::days(WINDOW_DAYS));

    for event in events {
        let schedule = Schedule::from_event(event);
        for instant in schedule.occurrences_within(&window)? {
            if let Some(bucket) = buckets.get_mut(&instant.date_naive()) {
                bucket.push(EventOccurrence {
                    id: event.id,
                    title: event.title.clone(),
                    start_datetime: instant,
                    duration: event.duration_minutes,
                });
            }
        }
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by_key(|occurrence| occurrence.start_datetime);
    }

    Ok(buckets)
}
