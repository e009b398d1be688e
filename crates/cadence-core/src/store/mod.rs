pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::event::Event;
use crate::user::User;

/// Persistence interface for calendar events.
///
/// Implementations must scope every operation to the owning user; a
/// caller can never observe or remove another user's events through
/// this trait.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// ## Errors
    /// Returns a `StoreError` if the event cannot be persisted.
    async fn insert(&self, event: &Event) -> StoreResult<()>;

    /// ## Errors
    /// Returns a `StoreError` if the lookup fails.
    async fn list_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Event>>;

    /// Finds an owned event starting at exactly the given instant.
    ///
    /// ## Errors
    /// Returns a `StoreError` if the lookup fails.
    async fn find_by_owner_and_start(
        &self,
        owner_id: Uuid,
        start_at: DateTime<Utc>,
    ) -> StoreResult<Option<Event>>;

    /// Deletes an event if and only if it is owned by `owner_id`.
    /// Returns `true` when a row was removed.
    ///
    /// ## Errors
    /// Returns a `StoreError` if the delete fails.
    async fn delete_owned(&self, event_id: Uuid, owner_id: Uuid) -> StoreResult<bool>;
}

/// Persistence interface for registered accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// ## Errors
    /// Returns `StoreError::Duplicate` when the username or email is
    /// already taken, or another `StoreError` if the insert fails.
    async fn insert(&self, user: &User) -> StoreResult<()>;

    /// ## Errors
    /// Returns a `StoreError` if the lookup fails.
    async fn find_by_id(&self, user_id: Uuid) -> StoreResult<Option<User>>;

    /// ## Errors
    /// Returns a `StoreError` if the lookup fails.
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// ## Errors
    /// Returns a `StoreError` if the lookup fails.
    async fn username_exists(&self, username: &str) -> StoreResult<bool>;

    /// ## Errors
    /// Returns a `StoreError` if the lookup fails.
    async fn email_exists(&self, email: &str) -> StoreResult<bool>;
}
