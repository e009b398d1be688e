use diesel::{pg::Pg, prelude::*};

use crate::db::enums::RecurrenceKind;
use crate::db::schema;
use cadence_core::event::Event;

#[derive(Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable)]
#[diesel(table_name = schema::events)]
#[diesel(check_for_backend(Pg))]
pub struct EventRow {
    pub id: uuid::Uuid,
    pub title: String,
    pub start_at: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i32,
    pub recurrence: RecurrenceKind,
    pub recurrence_end: Option<chrono::DateTime<chrono::Utc>>,
    pub owner_id: uuid::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::events)]
pub struct NewEventRow<'a> {
    pub id: uuid::Uuid,
    pub title: &'a str,
    pub start_at: chrono::DateTime<chrono::Utc>,
    pub duration_minutes: i32,
    pub recurrence: RecurrenceKind,
    pub recurrence_end: Option<chrono::DateTime<chrono::Utc>>,
    pub owner_id: uuid::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            start_at: row.start_at,
            duration_minutes: row.duration_minutes,
            recurrence: row.recurrence.into(),
            recurrence_end: row.recurrence_end,
            owner_id: row.owner_id,
            created_at: row.created_at,
        }
    }
}

impl<'a> NewEventRow<'a> {
    #[must_use]
    pub fn from_event(event: &'a Event) -> Self {
        Self {
            id: event.id,
            title: &event.title,
            start_at: event.start_at,
            duration_minutes: event.duration_minutes,
            recurrence: event.recurrence.into(),
            recurrence_end: event.recurrence_end,
            owner_id: event.owner_id,
            created_at: event.created_at,
        }
    }
}
