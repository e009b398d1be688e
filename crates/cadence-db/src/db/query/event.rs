//! Query composition for `events` table operations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::events;
use crate::model::event::{EventRow, NewEventRow};

/// Returns a query for all events (unfiltered).
#[must_use]
pub fn all() -> events::BoxedQuery<'static, diesel::pg::Pg> {
    events::table.into_boxed()
}

/// Returns a query for events owned by the given user.
#[must_use]
pub fn by_owner(owner_id: Uuid) -> events::BoxedQuery<'static, diesel::pg::Pg> {
    all().filter(events::owner_id.eq(owner_id))
}

/// Returns a query for an owned event starting at an exact instant.
#[must_use]
pub fn by_owner_and_start(
    owner_id: Uuid,
    start_at: DateTime<Utc>,
) -> events::BoxedQuery<'static, diesel::pg::Pg> {
    by_owner(owner_id).filter(events::start_at.eq(start_at))
}

/// Inserts a single event row.
///
/// ## Errors
/// Returns a database error if the insert fails.
pub async fn insert_event(
    conn: &mut DbConnection<'_>,
    event: &NewEventRow<'_>,
) -> Result<usize, diesel::result::Error> {
    diesel::insert_into(events::table)
        .values(event)
        .execute(conn)
        .await
}

/// Loads all events owned by a user, ordered by start instant.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn load_by_owner(
    conn: &mut DbConnection<'_>,
    owner_id: Uuid,
) -> Result<Vec<EventRow>, diesel::result::Error> {
    by_owner(owner_id)
        .select(EventRow::as_select())
        .order(events::start_at.asc())
        .load(conn)
        .await
}

/// Finds an owned event starting at exactly the given instant.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_at_instant(
    conn: &mut DbConnection<'_>,
    owner_id: Uuid,
    start_at: DateTime<Utc>,
) -> Result<Option<EventRow>, diesel::result::Error> {
    by_owner_and_start(owner_id, start_at)
        .select(EventRow::as_select())
        .first(conn)
        .await
        .optional()
}

/// Deletes an event if it is owned by the given user. Returns the number
/// of rows removed.
///
/// ## Errors
/// Returns a database error if the delete fails.
pub async fn delete_owned(
    conn: &mut DbConnection<'_>,
    event_id: Uuid,
    owner_id: Uuid,
) -> Result<usize, diesel::result::Error> {
    diesel::delete(
        events::table
            .filter(events::id.eq(event_id))
            .filter(events::owner_id.eq(owner_id)),
    )
    .execute(conn)
    .await
}
