//! Threadsafe in-memory store adapters, used by unit and handler tests
//! in place of PostgreSQL.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::event::Event;
use crate::store::{EventStore, UserStore};
use crate::user::User;

#[derive(Debug, Default)]
pub struct MemoryEventStore {
    events: RwLock<Vec<Event>>,
}

impl MemoryEventStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<Event>>> {
        self.events
            .read()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<Event>>> {
        self.events
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn insert(&self, event: &Event) -> StoreResult<()> {
        self.write()?.push(event.clone());
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Event>> {
        Ok(self
            .read()?
            .iter()
            .filter(|event| event.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn find_by_owner_and_start(
        &self,
        owner_id: Uuid,
        start_at: DateTime<Utc>,
    ) -> StoreResult<Option<Event>> {
        Ok(self
            .read()?
            .iter()
            .find(|event| event.owner_id == owner_id && event.start_at == start_at)
            .cloned())
    }

    async fn delete_owned(&self, event_id: Uuid, owner_id: Uuid) -> StoreResult<bool> {
        let mut events = self.write()?;
        let before = events.len();
        events.retain(|event| !(event.id == event_id && event.owner_id == owner_id));
        Ok(events.len() < before)
    }
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<User>>> {
        self.users
            .read()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<User>>> {
        self.users
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &User) -> StoreResult<()> {
        let mut users = self.write()?;
        // Mirrors the unique constraints on the users table.
        if users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Duplicate(format!(
                "username {}",
                user.username
            )));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Duplicate(format!("email {}", user.email)));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.read()?.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .read()?
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> StoreResult<bool> {
        Ok(self.read()?.iter().any(|u| u.username == username))
    }

    async fn email_exists(&self, email: &str) -> StoreResult<bool> {
        Ok(self.read()?.iter().any(|u| u.email == email))
    }
}
