//! Conversions between the public DTOs in `shared` and domain types.

pub mod analytics_mapper;
pub mod bill_mapper;
pub mod budget_mapper;
pub mod pot_mapper;
pub mod transaction_mapper;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::backend::domain::errors::{DomainError, DomainResult};
use crate::backend::domain::sorting::SortBy;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepts a calendar date or an RFC 3339 timestamp (whose date part is kept)
pub fn parse_date(field: &str, value: &str) -> DomainResult<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.date_naive())
        .map_err(|_| DomainError::validation(format!("{} must be YYYY-MM-DD, got '{}'", field, value)))
}

/// Accepts an RFC 3339 timestamp or a calendar date (midnight UTC)
pub fn parse_timestamp(field: &str, value: &str) -> DomainResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
        .map_err(|_| {
            DomainError::validation(format!("{} must be an RFC 3339 timestamp, got '{}'", field, value))
        })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn sort_to_domain(sort: shared::SortBy) -> SortBy {
    match sort {
        shared::SortBy::Latest => SortBy::Latest,
        shared::SortBy::Oldest => SortBy::Oldest,
        shared::SortBy::AToZ => SortBy::AToZ,
        shared::SortBy::ZToA => SortBy::ZToA,
        shared::SortBy::Highest => SortBy::Highest,
        shared::SortBy::Lowest => SortBy::Lowest,
    }
}
