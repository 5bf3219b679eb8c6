//! Shared validation helpers for inbound HTTP adapters.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::Error;

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be an RFC 3339 timestamp")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_timestamp",
    }))
}

/// Parse an optional RFC 3339 timestamp.
///
/// Blank input is treated as absent so the required-field check, not the
/// format check, reports it.
pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    let Some(raw) = value else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|timestamp| Some(timestamp.with_timezone(&Utc)))
        .map_err(|_| invalid_timestamp_error(field, &raw))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    const DATE: FieldName = FieldName::new("date");

    #[rstest]
    fn parses_utc_and_offset_timestamps() {
        let utc = parse_optional_rfc3339_timestamp(Some("2024-12-07T10:00:00Z".into()), DATE)
            .expect("valid timestamp")
            .expect("present");
        let offset = parse_optional_rfc3339_timestamp(Some("2024-12-07T12:00:00+02:00".into()), DATE)
            .expect("valid timestamp")
            .expect("present");
        assert_eq!(utc, offset);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[case(Some("   ".into()))]
    fn absent_or_blank_is_none(#[case] value: Option<String>) {
        let parsed = parse_optional_rfc3339_timestamp(value, DATE).expect("no error");
        assert_eq!(parsed, None);
    }

    #[rstest]
    #[case("yesterday")]
    #[case("2024-12-07")]
    #[case("2024-13-40T99:00:00Z")]
    fn malformed_timestamps_are_rejected(#[case] value: &str) {
        let err = parse_optional_rfc3339_timestamp(Some(value.into()), DATE)
            .expect_err("malformed timestamp rejected");
        let details = err.details().expect("details attached");
        assert_eq!(details["code"], "invalid_timestamp");
        assert_eq!(details["field"], "date");
    }
}
