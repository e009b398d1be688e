//! Request-level validation applied before an event is persisted.

use chrono::{DateTime, Utc};

use crate::error::{ServiceError, ServiceResult};
use cadence_core::constants::TITLE_MAX_CHARS;
use cadence_core::event::Recurrence;

pub const RECURRENCE_END_FORBIDDEN: &str =
    "Recurrence end date should not be provided when recurrence is NONE";
pub const RECURRENCE_END_REQUIRED: &str =
    "Recurrence end date is required for DAILY or WEEKLY recurrence";
pub const RECURRENCE_END_NOT_AFTER_START: &str =
    "Recurrence end date must be after the start date";

/// ## Summary
/// Enforces the recurrence-field consistency rules.
///
/// A non-recurring event must not carry an end date; a recurring one must
/// carry an end date whose calendar date is strictly after the start date.
///
/// ## Errors
/// Returns a validation error with the user-facing message on the first
/// violated rule.
pub fn validate_recurrence(
    recurrence: Recurrence,
    recurrence_end: Option<DateTime<Utc>>,
    start_at: DateTime<Utc>,
) -> ServiceResult<()> {
    match (recurrence, recurrence_end) {
        (Recurrence::None, Some(_)) => Err(ServiceError::ValidationError(
            RECURRENCE_END_FORBIDDEN.to_string(),
        )),
        (Recurrence::None, None) => Ok(()),
        (Recurrence::Daily | Recurrence::Weekly, None) => Err(ServiceError::ValidationError(
            RECURRENCE_END_REQUIRED.to_string(),
        )),
        (Recurrence::Daily | Recurrence::Weekly, Some(end)) => {
            if end.date_naive() <= start_at.date_naive() {
                return Err(ServiceError::ValidationError(
                    RECURRENCE_END_NOT_AFTER_START.to_string(),
                ));
            }
            Ok(())
        }
    }
}

/// ## Errors
/// Returns a validation error when the title is blank or longer than the
/// persisted column allows.
pub fn validate_title(title: &str) -> ServiceResult<()> {
    if title.trim().is_empty() {
        return Err(ServiceError::ValidationError(
            "Title may not be blank".to_string(),
        ));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ServiceError::ValidationError(format!(
            "Title may not exceed {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

/// ## Errors
/// Returns a validation error when the duration is not a positive number
/// of minutes.
pub fn validate_duration(duration_minutes: i32) -> ServiceResult<()> {
    if duration_minutes < 1 {
        return Err(ServiceError::ValidationError(
            "Duration must be a positive number of minutes".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().expect("valid")
    }

    #[test]
    fn none_with_an_end_date_is_rejected() {
        let result = validate_recurrence(
            Recurrence::None,
            Some(at(2024, 6, 10, 0)),
            at(2024, 6, 3, 9),
        );
        match result {
            Err(ServiceError::ValidationError(message)) => {
                assert_eq!(message, RECURRENCE_END_FORBIDDEN);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn recurring_without_an_end_date_is_rejected() {
        let result = validate_recurrence(Recurrence::Daily, None, at(2024, 6, 3, 9));
        match result {
            Err(ServiceError::ValidationError(message)) => {
                assert_eq!(message, RECURRENCE_END_REQUIRED);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn recurring_end_must_fall_on_a_later_date() {
        // Same date, later time of day: still rejected.
        let same_day = validate_recurrence(
            Recurrence::Weekly,
            Some(at(2024, 6, 3, 23)),
            at(2024, 6, 3, 9),
        );
        match same_day {
            Err(ServiceError::ValidationError(message)) => {
                assert_eq!(message, RECURRENCE_END_NOT_AFTER_START);
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        let earlier = validate_recurrence(
            Recurrence::Daily,
            Some(at(2024, 6, 1, 9)),
            at(2024, 6, 3, 9),
        );
        assert!(earlier.is_err());
    }

    #[test]
    fn well_formed_schedules_pass() {
        assert!(validate_recurrence(Recurrence::None, None, at(2024, 6, 3, 9)).is_ok());
        assert!(
            validate_recurrence(
                Recurrence::Daily,
                Some(at(2024, 6, 5, 0)),
                at(2024, 6, 3, 9)
            )
            .is_ok()
        );
        // Midnight of the next date counts as a later date.
        assert!(
            validate_recurrence(
                Recurrence::Weekly,
                Some(at(2024, 6, 4, 0)),
                at(2024, 6, 3, 23)
            )
            .is_ok()
        );
    }

    #[test]
    fn titles_are_bounded_and_non_blank() {
        assert!(validate_title("Standup").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(100)).is_ok());
        assert!(validate_title(&"x".repeat(101)).is_err());
    }

    #[test]
    fn durations_must_be_positive() {
        assert!(validate_duration(1).is_ok());
        assert!(validate_duration(0).is_err());
        assert!(validate_duration(-15).is_err());
    }
}
