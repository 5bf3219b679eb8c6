//! In-memory repository implementations.
//!
//! Used by unit and integration tests, and by the server when no database
//! is configured. Behaviour mirrors the Diesel adapters: list ordering,
//! duplicate-email conflicts, and delete-reports-existence all match.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::ports::{
    ServiceRecordPersistenceError, ServiceRecordRepository, UserPersistenceError, UserRepository,
};
use super::service_record::ServiceRecord;
use super::user::{Email, User, UserAccount, UserId};

/// Map-backed [`ServiceRecordRepository`].
#[derive(Debug, Default)]
pub struct InMemoryServiceRecordRepository {
    records: Mutex<HashMap<Uuid, ServiceRecord>>,
}

impl InMemoryServiceRecordRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all owners.
    pub fn len(&self) -> usize {
        self.guard().len()
    }

    /// Whether the repository holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, ServiceRecord>> {
        // A poisoned lock means a panic elsewhere already sank the test.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ServiceRecordRepository for InMemoryServiceRecordRepository {
    async fn list_for_user(
        &self,
        owner: &UserId,
    ) -> Result<Vec<ServiceRecord>, ServiceRecordPersistenceError> {
        let mut records: Vec<ServiceRecord> = self
            .guard()
            .values()
            .filter(|record| record.user_id == *owner)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ServiceRecord>, ServiceRecordPersistenceError> {
        Ok(self.guard().get(&id).cloned())
    }

    async fn insert(
        &self,
        record: &ServiceRecord,
    ) -> Result<(), ServiceRecordPersistenceError> {
        self.guard().insert(record.id, record.clone());
        Ok(())
    }

    async fn update(
        &self,
        record: &ServiceRecord,
    ) -> Result<(), ServiceRecordPersistenceError> {
        self.guard().insert(record.id, record.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceRecordPersistenceError> {
        Ok(self.guard().remove(&id).is_some())
    }
}

/// Map-backed [`UserRepository`].
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<HashMap<Uuid, UserAccount>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, UserAccount>> {
        self.accounts.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut guard = self.guard();
        if guard
            .values()
            .any(|existing| existing.user.email == account.user.email)
        {
            return Err(UserPersistenceError::duplicate_email(
                account.user.email.as_str(),
            ));
        }
        guard.insert(*account.user.id.as_uuid(), account.clone());
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        Ok(self
            .guard()
            .values()
            .find(|account| account.user.email == *email)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .guard()
            .get(id.as_uuid())
            .map(|account| account.user.clone()))
    }
}
