//! Shared validation helpers for inbound HTTP payloads.
//!
//! Every failure is an `invalid_request` error tagged with the offending
//! field so clients can highlight the right input.

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn parse_uuid(value: &str, field: &'static str) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
            "field": field,
            "value": value,
            "code": "invalid_uuid",
        }))
    })
}

pub(crate) fn parse_date(value: &str, field: &'static str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        Error::invalid_request(format!("{field} must be a calendar date (YYYY-MM-DD)"))
            .with_details(json!({
                "field": field,
                "value": value,
                "code": "invalid_date",
            }))
    })
}

pub(crate) fn parse_optional_date(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<NaiveDate>, Error> {
    value.map(|raw| parse_date(raw, field)).transpose()
}

/// Reject zero where a count must be at least one.
pub(crate) fn require_at_least_one(value: u32, field: &'static str) -> Result<u32, Error> {
    if value == 0 {
        return Err(
            Error::invalid_request(format!("{field} must be at least 1")).with_details(json!({
                "field": field,
                "value": value,
                "code": "below_minimum",
            })),
        );
    }
    Ok(value)
}
