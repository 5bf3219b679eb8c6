//! Service record HTTP handlers.
//!
//! ```text
//! GET    /api/service-records        List the caller's records
//! GET    /api/service-records/{id}   Fetch one owned record
//! POST   /api/service-records        Create a record
//! PUT    /api/service-records/{id}   Partially update a record
//! DELETE /api/service-records/{id}   Delete a record
//! ```
//!
//! Every route requires an authenticated session; the handlers hand the
//! resolved owner id to the domain service and map its results onto the
//! wire format the dashboard client consumes.

use actix_web::{delete, get, post, put, web, HttpResponse};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    Error, PartsUsedPatch, ServiceRecord, ServiceRecordInput, ServiceRecordPatch, ServiceTimeInput,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_optional_rfc3339_timestamp, FieldName};
use crate::inbound::http::ApiResult;

/// One service record as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecordBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "date-time")]
    pub date: String,
    pub service_type: String,
    pub service_time: f64,
    pub equipment_id: String,
    pub equipment_type: String,
    pub technician: String,
    /// Null when no parts were recorded.
    pub parts_used: Option<String>,
    pub service_notes: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

impl From<ServiceRecord> for ServiceRecordBody {
    fn from(record: ServiceRecord) -> Self {
        Self {
            id: record.id.to_string(),
            date: record.date.to_rfc3339(),
            service_type: record.service_type,
            service_time: record.service_time.hours(),
            equipment_id: record.equipment_id,
            equipment_type: record.equipment_type,
            technician: record.technician,
            parts_used: record.parts_used,
            service_notes: record.service_notes,
            user_id: record.user_id.to_string(),
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

/// Request payload for creating a service record.
///
/// Every field is optional at the wire level; the domain reports the full
/// required-field list when any is absent.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRecordBody {
    #[schema(format = "date-time")]
    pub date: Option<String>,
    pub service_type: Option<String>,
    /// Hours spent; a JSON number or numeric string.
    #[schema(value_type = Option<f64>)]
    pub service_time: Option<ServiceTimeInput>,
    pub equipment_id: Option<String>,
    pub equipment_type: Option<String>,
    pub technician: Option<String>,
    pub parts_used: Option<String>,
    pub service_notes: Option<String>,
}

impl CreateServiceRecordBody {
    fn into_input(self) -> Result<ServiceRecordInput, Error> {
        Ok(ServiceRecordInput {
            date: parse_optional_rfc3339_timestamp(self.date, FieldName::new("date"))?,
            service_type: self.service_type,
            service_time: self.service_time,
            equipment_id: self.equipment_id,
            equipment_type: self.equipment_type,
            technician: self.technician,
            parts_used: self.parts_used,
            service_notes: self.service_notes,
        })
    }
}

/// Envelope for the create response.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedBody {
    pub data: ServiceRecordBody,
}

/// Distinguish an absent `partsUsed` key from an explicit null.
///
/// Serde collapses both to `None` by default; wrapping the inner option and
/// marking the field `default` keeps the outer `None` for "key absent" and
/// `Some(None)` for "key present and null".
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Request payload for partially updating a service record.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRecordBody {
    #[schema(format = "date-time")]
    pub date: Option<String>,
    pub service_type: Option<String>,
    /// Hours spent; a JSON number or numeric string.
    #[schema(value_type = Option<f64>)]
    pub service_time: Option<ServiceTimeInput>,
    pub equipment_id: Option<String>,
    pub equipment_type: Option<String>,
    pub technician: Option<String>,
    /// Absent: unchanged. Null or empty: cleared. Text: replaced.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub parts_used: Option<Option<String>>,
    pub service_notes: Option<String>,
}

impl UpdateServiceRecordBody {
    fn into_patch(self) -> Result<ServiceRecordPatch, Error> {
        let parts_used = match self.parts_used {
            None => PartsUsedPatch::Unchanged,
            Some(None) => PartsUsedPatch::Clear,
            Some(Some(value)) => PartsUsedPatch::Set(value),
        };
        Ok(ServiceRecordPatch {
            date: parse_optional_rfc3339_timestamp(self.date, FieldName::new("date"))?,
            service_type: self.service_type,
            service_time: self.service_time,
            equipment_id: self.equipment_id,
            equipment_type: self.equipment_type,
            technician: self.technician,
            parts_used,
            service_notes: self.service_notes,
        })
    }
}

/// A path id that is not a UUID can never name a record, so it reports the
/// same NotFound as an unknown id rather than a format error.
fn parse_record_id(raw: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(raw).map_err(|_| Error::not_found("Record not found"))
}

/// List the authenticated user's service records, newest first.
#[utoipa::path(
    get,
    path = "/api/service-records",
    responses(
        (status = 200, description = "The caller's records", body = [ServiceRecordBody]),
        (status = 401, description = "Unauthorized", body = crate::inbound::http::schemas::ErrorBodySchema)
    ),
    tags = ["service-records"],
    operation_id = "listServiceRecords",
    security(("SessionCookie" = []))
)]
#[get("/service-records")]
pub async fn list_records(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ServiceRecordBody>>> {
    let owner = session.require_user_id()?;
    let records = state.records.list(&owner).await?;
    Ok(web::Json(
        records.into_iter().map(ServiceRecordBody::from).collect(),
    ))
}

/// Fetch a single owned service record.
#[utoipa::path(
    get,
    path = "/api/service-records/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "The record", body = ServiceRecordBody),
        (status = 401, description = "Unauthorized", body = crate::inbound::http::schemas::ErrorBodySchema),
        (status = 403, description = "Owned by another user", body = crate::inbound::http::schemas::ErrorBodySchema),
        (status = 404, description = "No such record", body = crate::inbound::http::schemas::ErrorBodySchema)
    ),
    tags = ["service-records"],
    operation_id = "getServiceRecord",
    security(("SessionCookie" = []))
)]
#[get("/service-records/{id}")]
pub async fn get_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ServiceRecordBody>> {
    let owner = session.require_user_id()?;
    let record_id = parse_record_id(&path.into_inner())?;
    let record = state.records.get(&owner, record_id).await?;
    Ok(web::Json(ServiceRecordBody::from(record)))
}

/// Create a service record owned by the authenticated user.
#[utoipa::path(
    post,
    path = "/api/service-records",
    request_body = CreateServiceRecordBody,
    responses(
        (status = 201, description = "Record created", body = CreatedBody),
        (status = 400, description = "Missing or malformed fields", body = crate::inbound::http::schemas::ErrorBodySchema),
        (status = 401, description = "Unauthorized", body = crate::inbound::http::schemas::ErrorBodySchema)
    ),
    tags = ["service-records"],
    operation_id = "createServiceRecord",
    security(("SessionCookie" = []))
)]
#[post("/service-records")]
pub async fn create_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateServiceRecordBody>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let input = payload.into_inner().into_input()?;
    let record = state.records.create(&owner, input).await?;
    Ok(HttpResponse::Created().json(CreatedBody {
        data: ServiceRecordBody::from(record),
    }))
}

/// Partially update an owned service record.
#[utoipa::path(
    put,
    path = "/api/service-records/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    request_body = UpdateServiceRecordBody,
    responses(
        (status = 200, description = "Updated record", body = ServiceRecordBody),
        (status = 400, description = "Malformed fields", body = crate::inbound::http::schemas::ErrorBodySchema),
        (status = 401, description = "Unauthorized", body = crate::inbound::http::schemas::ErrorBodySchema),
        (status = 403, description = "Owned by another user", body = crate::inbound::http::schemas::ErrorBodySchema),
        (status = 404, description = "No such record", body = crate::inbound::http::schemas::ErrorBodySchema)
    ),
    tags = ["service-records"],
    operation_id = "updateServiceRecord",
    security(("SessionCookie" = []))
)]
#[put("/service-records/{id}")]
pub async fn update_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateServiceRecordBody>,
) -> ApiResult<web::Json<ServiceRecordBody>> {
    let owner = session.require_user_id()?;
    let record_id = parse_record_id(&path.into_inner())?;
    let patch = payload.into_inner().into_patch()?;
    let record = state.records.update(&owner, record_id, patch).await?;
    Ok(web::Json(ServiceRecordBody::from(record)))
}

/// Permanently delete an owned service record.
#[utoipa::path(
    delete,
    path = "/api/service-records/{id}",
    params(("id" = String, Path, description = "Record identifier")),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 401, description = "Unauthorized", body = crate::inbound::http::schemas::ErrorBodySchema),
        (status = 403, description = "Owned by another user", body = crate::inbound::http::schemas::ErrorBodySchema),
        (status = 404, description = "No such record", body = crate::inbound::http::schemas::ErrorBodySchema)
    ),
    tags = ["service-records"],
    operation_id = "deleteServiceRecord",
    security(("SessionCookie" = []))
)]
#[delete("/service-records/{id}")]
pub async fn delete_record(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user_id()?;
    let record_id = parse_record_id(&path.into_inner())?;
    state.records.delete(&owner, record_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
