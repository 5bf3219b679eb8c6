//! PostgreSQL-backed `ServiceRecordRepository` implementation using Diesel.
//!
//! A thin adapter: translates between Diesel rows and domain records and
//! maps driver failures onto the domain's persistence error variants. All
//! ordering and ownership semantics live in the query contract; business
//! rules stay in the domain service.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{ServiceRecordPersistenceError, ServiceRecordRepository};
use crate::domain::{ServiceRecord, ServiceTime, UserId};

use super::models::{NewServiceRecordRow, ServiceRecordChangeset, ServiceRecordRow};
use super::pool::{DbPool, PoolError};
use super::schema::service_records;

/// Diesel-backed implementation of the `ServiceRecordRepository` port.
#[derive(Clone)]
pub struct DieselServiceRecordRepository {
    pool: DbPool,
}

impl DieselServiceRecordRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain persistence errors.
fn map_pool_error(error: PoolError) -> ServiceRecordPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ServiceRecordPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to domain persistence errors.
fn map_diesel_error(error: diesel::result::Error) -> ServiceRecordPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ServiceRecordPersistenceError::connection("database connection error")
        }
        _ => ServiceRecordPersistenceError::query("database error"),
    }
}

/// Convert a database row to a domain record.
///
/// The CHECK constraint keeps `service_time` non-negative, so a conversion
/// failure means the row was written outside this application.
fn row_to_record(row: ServiceRecordRow) -> Result<ServiceRecord, ServiceRecordPersistenceError> {
    let service_time = ServiceTime::try_new(row.service_time).map_err(|err| {
        ServiceRecordPersistenceError::query(format!("corrupt service_time in row {}: {err}", row.id))
    })?;
    Ok(ServiceRecord {
        id: row.id,
        date: row.date,
        service_type: row.service_type,
        service_time,
        equipment_id: row.equipment_id,
        equipment_type: row.equipment_type,
        technician: row.technician,
        parts_used: row.parts_used,
        service_notes: row.service_notes,
        user_id: UserId::from_uuid(row.user_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn record_to_new_row(record: &ServiceRecord) -> NewServiceRecordRow<'_> {
    NewServiceRecordRow {
        id: record.id,
        date: record.date,
        service_type: &record.service_type,
        service_time: record.service_time.hours(),
        equipment_id: &record.equipment_id,
        equipment_type: &record.equipment_type,
        technician: &record.technician,
        parts_used: record.parts_used.as_deref(),
        service_notes: &record.service_notes,
        user_id: *record.user_id.as_uuid(),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

fn record_to_changeset(record: &ServiceRecord) -> ServiceRecordChangeset<'_> {
    ServiceRecordChangeset {
        date: record.date,
        service_type: &record.service_type,
        service_time: record.service_time.hours(),
        equipment_id: &record.equipment_id,
        equipment_type: &record.equipment_type,
        technician: &record.technician,
        parts_used: record.parts_used.as_deref(),
        service_notes: &record.service_notes,
        updated_at: record.updated_at,
    }
}

#[async_trait]
impl ServiceRecordRepository for DieselServiceRecordRepository {
    async fn list_for_user(
        &self,
        owner: &UserId,
    ) -> Result<Vec<ServiceRecord>, ServiceRecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ServiceRecordRow> = service_records::table
            .filter(service_records::user_id.eq(owner.as_uuid()))
            .order(service_records::created_at.desc())
            .select(ServiceRecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ServiceRecord>, ServiceRecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ServiceRecordRow> = service_records::table
            .find(id)
            .select(ServiceRecordRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn insert(
        &self,
        record: &ServiceRecord,
    ) -> Result<(), ServiceRecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(service_records::table)
            .values(record_to_new_row(record))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update(
        &self,
        record: &ServiceRecord,
    ) -> Result<(), ServiceRecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(service_records::table.find(record.id))
            .set(record_to_changeset(record))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceRecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(service_records::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}
