//! PostgreSQL adapters for the core store traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use cadence_core::error::StoreResult;
use cadence_core::event::Event;
use cadence_core::store::{EventStore, UserStore};
use cadence_core::user::User;

use crate::db::connection::{DbConnection, DbPool};
use crate::db::query;
use crate::error::DbError;
use crate::model::event::NewEventRow;
use crate::model::user::NewUserRow;

async fn checkout(pool: &DbPool) -> StoreResult<DbConnection<'_>> {
    Ok(pool.get().await.map_err(DbError::from)?)
}

#[derive(Clone)]
pub struct PgEventStore {
    pool: DbPool,
}

impl PgEventStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    #[tracing::instrument(skip(self, event), fields(event_id = %event.id))]
    async fn insert(&self, event: &Event) -> StoreResult<()> {
        let mut conn = checkout(&self.pool).await?;
        query::event::insert_event(&mut conn, &NewEventRow::from_event(event))
            .await
            .map_err(DbError::from)?;
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Event>> {
        let mut conn = checkout(&self.pool).await?;
        let rows = query::event::load_by_owner(&mut conn, owner_id)
            .await
            .map_err(DbError::from)?;
        Ok(rows.into_iter().map(Event::from).collect())
    }

    async fn find_by_owner_and_start(
        &self,
        owner_id: Uuid,
        start_at: DateTime<Utc>,
    ) -> StoreResult<Option<Event>> {
        let mut conn = checkout(&self.pool).await?;
        let row = query::event::find_at_instant(&mut conn, owner_id, start_at)
            .await
            .map_err(DbError::from)?;
        Ok(row.map(Event::from))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_owned(&self, event_id: Uuid, owner_id: Uuid) -> StoreResult<bool> {
        let mut conn = checkout(&self.pool).await?;
        let removed = query::event::delete_owned(&mut conn, event_id, owner_id)
            .await
            .map_err(DbError::from)?;
        Ok(removed > 0)
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[tracing::instrument(skip(self, user), fields(user_id = %user.id))]
    async fn insert(&self, user: &User) -> StoreResult<()> {
        let mut conn = checkout(&self.pool).await?;
        query::user::insert_user(&mut conn, &NewUserRow::from_user(user))
            .await
            .map_err(DbError::from)?;
        Ok(())
    }

    async fn find_by_id(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        let mut conn = checkout(&self.pool).await?;
        let row = query::user::find_by_id(&mut conn, user_id)
            .await
            .map_err(DbError::from)?;
        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let mut conn = checkout(&self.pool).await?;
        let row = query::user::find_by_username(&mut conn, username)
            .await
            .map_err(DbError::from)?;
        Ok(row.map(User::from))
    }

    async fn username_exists(&self, username: &str) -> StoreResult<bool> {
        let mut conn = checkout(&self.pool).await?;
        let row = query::user::find_by_username(&mut conn, username)
            .await
            .map_err(DbError::from)?;
        Ok(row.is_some())
    }

    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        let mut conn = checkout(&self.pool).await?;
        let row = query::user::find_by_email(&mut conn, email)
            .await
            .map_err(DbError::from)?;
        Ok(row.is_some())
    }
}
