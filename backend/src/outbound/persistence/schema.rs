//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `migrations/` exactly;
//! Diesel uses them for compile-time query validation. Regenerate with
//! `diesel print-schema` after a migration changes the schema.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique, lowercased email address.
        email -> Varchar,
        /// Display name shown in the dashboard.
        name -> Varchar,
        /// Whether the address has been verified.
        email_verified -> Bool,
        /// Argon2id PHC hash of the account password.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Maintenance events logged against equipment.
    service_records (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// When the service took place.
        date -> Timestamptz,
        /// Kind of service performed.
        service_type -> Varchar,
        /// Hours spent; non-negative.
        service_time -> Float8,
        /// Identifier of the serviced equipment.
        equipment_id -> Varchar,
        /// Kind of equipment serviced.
        equipment_type -> Varchar,
        /// Technician who performed the service.
        technician -> Varchar,
        /// Parts consumed, when recorded.
        parts_used -> Nullable<Text>,
        /// Free-form notes.
        service_notes -> Text,
        /// Owner; the only identity allowed to read or mutate the row.
        user_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(service_records -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(service_records, users);
