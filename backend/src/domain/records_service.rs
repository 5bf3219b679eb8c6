//! Service record domain service.
//!
//! Implements the [`ServiceRecords`] driving port over a
//! [`ServiceRecordRepository`]: field validation, ownership checks, and the
//! four CRUD operations with their error semantics.
//!
//! ## Preconditions
//! The `owner` id handed to every operation has already been resolved by the
//! authentication layer. This service trusts it and never re-derives
//! identity.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::error;
use uuid::Uuid;

use super::error::Error;
use super::ports::{ServiceRecordPersistenceError, ServiceRecordRepository, ServiceRecords};
use super::service_record::{
    DraftValidationError, ServiceRecord, ServiceRecordDraft, ServiceRecordInput,
    ServiceRecordPatch, REQUIRED_FIELDS,
};
use super::user::UserId;

/// Repository-backed implementation of the [`ServiceRecords`] port.
#[derive(Clone)]
pub struct ServiceRecordService<R> {
    records: Arc<R>,
}

impl<R> ServiceRecordService<R> {
    /// Create a new service over the given repository.
    pub fn new(records: Arc<R>) -> Self {
        Self { records }
    }
}

/// Store failures are logged with their detail and reduced to a generic
/// internal error so driver messages never reach a client.
fn map_repository_error(err: ServiceRecordPersistenceError) -> Error {
    error!(error = %err, "service record store failure");
    Error::internal("Internal server error")
}

fn map_draft_error(err: DraftValidationError) -> Error {
    match err {
        DraftValidationError::MissingFields => Error::invalid_request("Missing required fields")
            .with_details(json!({ "required": REQUIRED_FIELDS })),
        DraftValidationError::InvalidServiceTime(time_err) => {
            Error::invalid_request(time_err.to_string())
        }
    }
}

fn record_not_found() -> Error {
    Error::not_found("Record not found")
}

impl<R> ServiceRecordService<R>
where
    R: ServiceRecordRepository,
{
    /// Fetch a record and authorize the caller against it.
    ///
    /// Existence is checked before ownership, so a caller probing another
    /// user's record id sees NotFound for absent ids and Forbidden for
    /// foreign ones. That discloses existence to any authenticated caller;
    /// accepted as the documented contract of this API.
    async fn fetch_owned(&self, owner: &UserId, record_id: Uuid) -> Result<ServiceRecord, Error> {
        let record = self
            .records
            .find_by_id(record_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(record_not_found)?;
        if record.user_id != *owner {
            return Err(Error::forbidden("Forbidden"));
        }
        Ok(record)
    }
}

#[async_trait]
impl<R> ServiceRecords for ServiceRecordService<R>
where
    R: ServiceRecordRepository,
{
    async fn list(&self, owner: &UserId) -> Result<Vec<ServiceRecord>, Error> {
        self.records
            .list_for_user(owner)
            .await
            .map_err(map_repository_error)
    }

    async fn get(&self, owner: &UserId, record_id: Uuid) -> Result<ServiceRecord, Error> {
        self.fetch_owned(owner, record_id).await
    }

    async fn create(
        &self,
        owner: &UserId,
        input: ServiceRecordInput,
    ) -> Result<ServiceRecord, Error> {
        let draft = ServiceRecordDraft::try_from(input).map_err(map_draft_error)?;
        let record = ServiceRecord::create(draft, *owner, Utc::now());
        self.records
            .insert(&record)
            .await
            .map_err(map_repository_error)?;
        Ok(record)
    }

    async fn update(
        &self,
        owner: &UserId,
        record_id: Uuid,
        patch: ServiceRecordPatch,
    ) -> Result<ServiceRecord, Error> {
        let mut record = self.fetch_owned(owner, record_id).await?;
        record
            .apply(patch, Utc::now())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.records
            .update(&record)
            .await
            .map_err(map_repository_error)?;
        Ok(record)
    }

    async fn delete(&self, owner: &UserId, record_id: Uuid) -> Result<(), Error> {
        self.fetch_owned(owner, record_id).await?;
        let removed = self
            .records
            .delete(record_id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            // Lost a race with a concurrent delete; reads as a second
            // delete, which is NotFound by contract.
            return Err(record_not_found());
        }
        Ok(())
    }
}
