//! Service record aggregate and its create/update inputs.
//!
//! One service record logs a single maintenance event against a piece of
//! equipment. Records are owned by exactly one user, assigned at creation
//! and never reassigned; the record service enforces that only the owner
//! can read, mutate, or delete a record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserId;

/// Wire-level names of the fields required to create a record, in the order
/// clients expect them back in the validation envelope.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "date",
    "serviceType",
    "serviceTime",
    "equipmentId",
    "equipmentType",
    "technician",
    "serviceNotes",
];

/// Failures raised when interpreting a service time value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceTimeError {
    /// Input was a string that does not parse as a number.
    NotNumeric,
    /// Value parsed but is negative.
    Negative,
    /// Value parsed but is NaN or infinite.
    NotFinite,
}

impl fmt::Display for ServiceTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNumeric => write!(f, "serviceTime must be a number"),
            Self::Negative => write!(f, "serviceTime must not be negative"),
            Self::NotFinite => write!(f, "serviceTime must be a finite number"),
        }
    }
}

impl std::error::Error for ServiceTimeError {}

/// Service duration in hours.
///
/// ## Invariants
/// - Non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ServiceTime(f64);

impl ServiceTime {
    /// Validate and construct a [`ServiceTime`] from a number of hours.
    pub fn try_new(hours: f64) -> Result<Self, ServiceTimeError> {
        if !hours.is_finite() {
            return Err(ServiceTimeError::NotFinite);
        }
        if hours < 0.0 {
            return Err(ServiceTimeError::Negative);
        }
        Ok(Self(hours))
    }

    /// Duration in hours.
    pub fn hours(&self) -> f64 {
        self.0
    }
}

impl From<ServiceTime> for f64 {
    fn from(value: ServiceTime) -> Self {
        value.0
    }
}

impl TryFrom<f64> for ServiceTime {
    type Error = ServiceTimeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

/// Raw service time as clients send it: a JSON number or a numeric string.
///
/// The intake form submits `"7.5"` while API clients send `7.5`; both must
/// parse, and non-numeric text must surface a validation error rather than
/// a silent zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceTimeInput {
    /// Plain JSON number.
    Number(f64),
    /// Numeric text, e.g. `"2.5"`.
    Text(String),
}

impl TryFrom<ServiceTimeInput> for ServiceTime {
    type Error = ServiceTimeError;

    fn try_from(value: ServiceTimeInput) -> Result<Self, Self::Error> {
        match value {
            ServiceTimeInput::Number(hours) => ServiceTime::try_new(hours),
            ServiceTimeInput::Text(raw) => {
                let hours: f64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ServiceTimeError::NotNumeric)?;
                ServiceTime::try_new(hours)
            }
        }
    }
}

/// One maintenance event logged against a piece of equipment.
///
/// ## Invariants
/// - `user_id` identifies the owner, set at creation and never reassigned.
/// - `id` is unique and stable for the record's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRecord {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub service_type: String,
    pub service_time: ServiceTime,
    pub equipment_id: String,
    pub equipment_type: String,
    pub technician: String,
    pub parts_used: Option<String>,
    pub service_notes: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceRecord {
    /// Materialise a validated draft into a stored record owned by `owner`.
    pub fn create(draft: ServiceRecordDraft, owner: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: draft.date,
            service_type: draft.service_type,
            service_time: draft.service_time,
            equipment_id: draft.equipment_id,
            equipment_type: draft.equipment_type,
            technician: draft.technician,
            parts_used: draft.parts_used,
            service_notes: draft.service_notes,
            user_id: owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update in place, bumping `updated_at`.
    ///
    /// Absent fields keep their prior values. `parts_used` honours the
    /// tri-state patch: absent leaves it unchanged, an explicit null or
    /// empty string clears it.
    pub fn apply(
        &mut self,
        patch: ServiceRecordPatch,
        now: DateTime<Utc>,
    ) -> Result<(), ServiceTimeError> {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(value) = nonempty(patch.service_type) {
            self.service_type = value;
        }
        if let Some(input) = patch.service_time {
            self.service_time = ServiceTime::try_from(input)?;
        }
        if let Some(value) = nonempty(patch.equipment_id) {
            self.equipment_id = value;
        }
        if let Some(value) = nonempty(patch.equipment_type) {
            self.equipment_type = value;
        }
        if let Some(value) = nonempty(patch.technician) {
            self.technician = value;
        }
        match patch.parts_used {
            PartsUsedPatch::Unchanged => {}
            PartsUsedPatch::Clear => self.parts_used = None,
            PartsUsedPatch::Set(value) => {
                self.parts_used = if value.trim().is_empty() {
                    None
                } else {
                    Some(value)
                };
            }
        }
        if let Some(value) = nonempty(patch.service_notes) {
            self.service_notes = value;
        }
        self.updated_at = now;
        Ok(())
    }
}

/// Required fields provided but blank behave as absent; an empty form
/// input never overwrites stored data.
fn nonempty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Unvalidated create input: every field as present-or-absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceRecordInput {
    pub date: Option<DateTime<Utc>>,
    pub service_type: Option<String>,
    pub service_time: Option<ServiceTimeInput>,
    pub equipment_id: Option<String>,
    pub equipment_type: Option<String>,
    pub technician: Option<String>,
    pub parts_used: Option<String>,
    pub service_notes: Option<String>,
}

/// Failures raised when validating a [`ServiceRecordInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftValidationError {
    /// One or more required fields were absent or blank.
    MissingFields,
    /// All required fields present but the service time does not parse.
    InvalidServiceTime(ServiceTimeError),
}

impl fmt::Display for DraftValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "Missing required fields"),
            Self::InvalidServiceTime(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for DraftValidationError {}

/// Validated create input for a service record.
///
/// ## Invariants
/// - All required text fields are non-blank.
/// - `parts_used` is `None` when absent or blank.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRecordDraft {
    pub date: DateTime<Utc>,
    pub service_type: String,
    pub service_time: ServiceTime,
    pub equipment_id: String,
    pub equipment_type: String,
    pub technician: String,
    pub parts_used: Option<String>,
    pub service_notes: String,
}

impl TryFrom<ServiceRecordInput> for ServiceRecordDraft {
    type Error = DraftValidationError;

    fn try_from(input: ServiceRecordInput) -> Result<Self, Self::Error> {
        let ServiceRecordInput {
            date,
            service_type,
            service_time,
            equipment_id,
            equipment_type,
            technician,
            parts_used,
            service_notes,
        } = input;

        let date = date.ok_or(DraftValidationError::MissingFields)?;
        let service_type = required(service_type)?;
        let service_time_input = service_time.ok_or(DraftValidationError::MissingFields)?;
        let equipment_id = required(equipment_id)?;
        let equipment_type = required(equipment_type)?;
        let technician = required(technician)?;
        let service_notes = required(service_notes)?;

        let service_time = ServiceTime::try_from(service_time_input)
            .map_err(DraftValidationError::InvalidServiceTime)?;

        Ok(Self {
            date,
            service_type,
            service_time,
            equipment_id,
            equipment_type,
            technician,
            parts_used: nonempty(parts_used),
            service_notes,
        })
    }
}

fn required(value: Option<String>) -> Result<String, DraftValidationError> {
    nonempty(value).ok_or(DraftValidationError::MissingFields)
}

/// Tri-state patch value for the one nullable field.
///
/// An absent key on the wire means "leave unchanged" while an explicit
/// `null` (or blank string) clears the stored value; collapsing the
/// distinction into `Option<Option<_>>` loses intent, so the domain keeps
/// it as an explicit enum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PartsUsedPatch {
    /// Field absent from the request: keep the stored value.
    #[default]
    Unchanged,
    /// Explicit null: clear the stored value.
    Clear,
    /// Replace the stored value (blank input also clears).
    Set(String),
}

/// Partial update input: only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceRecordPatch {
    pub date: Option<DateTime<Utc>>,
    pub service_type: Option<String>,
    pub service_time: Option<ServiceTimeInput>,
    pub equipment_id: Option<String>,
    pub equipment_type: Option<String>,
    pub technician: Option<String>,
    pub parts_used: PartsUsedPatch,
    pub service_notes: Option<String>,
}
