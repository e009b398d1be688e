//! Query composition for `users` table operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::schema::users;
use crate::model::user::{NewUserRow, UserRow};

/// Returns a query for all users (unfiltered).
#[must_use]
pub fn all() -> users::BoxedQuery<'static, diesel::pg::Pg> {
    users::table.into_boxed()
}

/// Returns a query for a user by username.
#[must_use]
pub fn by_username(username: &str) -> users::BoxedQuery<'_, diesel::pg::Pg> {
    all().filter(users::username.eq(username))
}

/// Returns a query for a user by email.
#[must_use]
pub fn by_email(email: &str) -> users::BoxedQuery<'_, diesel::pg::Pg> {
    all().filter(users::email.eq(email))
}

/// Inserts a single user row.
///
/// ## Errors
/// Returns a database error if the insert fails; a unique violation
/// signals a taken username or email.
pub async fn insert_user(
    conn: &mut DbConnection<'_>,
    user: &NewUserRow<'_>,
) -> Result<usize, diesel::result::Error> {
    diesel::insert_into(users::table)
        .values(user)
        .execute(conn)
        .await
}

/// Finds a user by id.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_by_id(
    conn: &mut DbConnection<'_>,
    user_id: Uuid,
) -> Result<Option<UserRow>, diesel::result::Error> {
    all()
        .filter(users::id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
}

/// Finds a user by username.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_by_username(
    conn: &mut DbConnection<'_>,
    username: &str,
) -> Result<Option<UserRow>, diesel::result::Error> {
    by_username(username)
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
}

/// Finds a user by email.
///
/// ## Errors
/// Returns a database error if the query fails.
pub async fn find_by_email(
    conn: &mut DbConnection<'_>,
    email: &str,
) -> Result<Option<UserRow>, diesel::result::Error> {
    by_email(email)
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
}
