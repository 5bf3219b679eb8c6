//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{service_records, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub email_verified: bool,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: &'a str,
    pub email_verified: bool,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the service_records table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = service_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ServiceRecordRow {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub service_type: String,
    pub service_time: f64,
    pub equipment_id: String,
    pub equipment_type: String,
    pub technician: String,
    pub parts_used: Option<String>,
    pub service_notes: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new service records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = service_records)]
pub(crate) struct NewServiceRecordRow<'a> {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub service_type: &'a str,
    pub service_time: f64,
    pub equipment_id: &'a str,
    pub equipment_type: &'a str,
    pub technician: &'a str,
    pub parts_used: Option<&'a str>,
    pub service_notes: &'a str,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for overwriting an existing service record.
///
/// Partial-update semantics are resolved in the domain before the adapter
/// runs; by the time a changeset is built every column has its final value.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = service_records)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ServiceRecordChangeset<'a> {
    pub date: DateTime<Utc>,
    pub service_type: &'a str,
    pub service_time: f64,
    pub equipment_id: &'a str,
    pub equipment_type: &'a str,
    pub technician: &'a str,
    pub parts_used: Option<&'a str>,
    pub service_notes: &'a str,
    pub updated_at: DateTime<Utc>,
}
