//! Recurrence expansion: projects an event's schedule into the ordered
//! sequence of occurrence instants inside a bounding window.

use chrono::{DateTime, Utc};
use rrule::{RRule, Tz, Unvalidated};

use crate::error::{ServiceError, ServiceResult};
use crate::events::validate::RECURRENCE_END_REQUIRED;
use cadence_core::constants::MAX_OCCURRENCES;
use cadence_core::event::{Event, Recurrence};

/// An inclusive instant range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    #[must_use]
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

/// The recurrence-relevant slice of an event or creation candidate.
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    pub start_at: DateTime<Utc>,
    pub recurrence: Recurrence,
    pub recurrence_end: Option<DateTime<Utc>>,
}

impl Schedule {
    #[must_use]
    pub fn from_event(event: &Event) -> Self {
        Self {
            start_at: event.start_at,
            recurrence: event.recurrence,
            recurrence_end: event.recurrence_end,
        }
    }

    /// ## Summary
    /// Expands the schedule into its occurrence instants within `window`
    /// (inclusive on both bounds), in ascending order.
    ///
    /// A non-recurring schedule contributes its start instant when its
    /// calendar date falls within the window's dates. A recurring one
    /// steps at the daily/weekly stride from `start_at` through
    /// `min(recurrence_end, window.end)`, then drops instants before
    /// `window.start`. All instants are UTC, so the stride is exactly
    /// 24h or 168h.
    ///
    /// ## Errors
    /// Returns a validation error when a recurring schedule has no end
    /// date, when the rule fails to build, or when the expansion exceeds
    /// the occurrence cap.
    pub fn occurrences_within(&self, window: &Window) -> ServiceResult<Vec<DateTime<Utc>>> {
        let freq = match self.recurrence {
            Recurrence::None => {
                let dates = window.start.date_naive()..=window.end.date_naive();
                if dates.contains(&self.start_at.date_naive()) {
                    return Ok(vec![self.start_at]);
                }
                return Ok(Vec::new());
            }
            Recurrence::Daily => "DAILY",
            Recurrence::Weekly => "WEEKLY",
        };

        let Some(recurrence_end) = self.recurrence_end else {
            return Err(ServiceError::ValidationError(
                RECURRENCE_END_REQUIRED.to_string(),
            ));
        };

        let until = recurrence_end.min(window.end);
        if until < self.start_at {
            return Ok(Vec::new());
        }

        // UNTIL is inclusive per RFC 5545, which matches the window bounds.
        let rule_text = format!("FREQ={freq};UNTIL={}", until.format("%Y%m%dT%H%M%SZ"));
        let rrule = rule_text
            .parse::<RRule<Unvalidated>>()
            .map_err(|err| ServiceError::ValidationError(err.to_string()))?;
        let rrule_set = rrule
            .build(self.start_at.with_timezone(&Tz::UTC))
            .map_err(|err| ServiceError::ValidationError(err.to_string()))?;

        let result = rrule_set.all(MAX_OCCURRENCES);
        if result.limited {
            return Err(ServiceError::ValidationError(format!(
                "Recurrence expands to more than {MAX_OCCURRENCES} occurrences"
            )));
        }

        let mut occurrences: Vec<DateTime<Utc>> = result
            .dates
            .into_iter()
            .map(|instant| instant.with_timezone(&Utc))
            .filter(|instant| *instant >= window.start)
            .collect();
        occurrences.sort_unstable();

        Ok(occurrences)
    }
}
