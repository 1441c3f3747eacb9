//! Report model shared by every aggregation and view
//!
//! Reports arrive as loosely typed JSON; `source::parser` normalizes them into
//! this shape before anything else sees them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fmt;

use crate::error::RecordError;
use crate::utils::parse_timestamp;

/// Geolocation attached to a report
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct Location {
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
}

impl Location {
    /// Key used by the known-location table: "28.7041_77.1025"
    pub(crate) fn lookup_key(&self) -> String {
        format!("{:.4}_{:.4}", self.latitude, self.longitude)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// A single incident submission
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Report {
    pub(crate) id: String,
    /// Non-empty category label, `None` when missing
    pub(crate) category: Option<String>,
    /// Non-empty status label, `None` when missing
    pub(crate) status: Option<String>,
    /// Raw timestamp as supplied; parsed lazily by date-keyed views
    pub(crate) created_at: Option<String>,
    pub(crate) location: Option<Location>,
    pub(crate) description: String,
    pub(crate) reported_by: Option<String>,
    pub(crate) files: Vec<String>,
}

impl Report {
    pub(crate) fn created_utc(&self) -> Result<DateTime<Utc>, RecordError> {
        let Some(raw) = self.created_at.as_deref() else {
            return Err(RecordError::MissingCreatedAt {
                id: self.id.clone(),
            });
        };
        parse_timestamp(raw).ok_or_else(|| RecordError::InvalidCreatedAt {
            id: self.id.clone(),
            input: raw.to_string(),
        })
    }

    /// UTC calendar day of `createdAt`
    pub(crate) fn created_date(&self) -> Option<NaiveDate> {
        self.created_utc().ok().map(|ts| ts.date_naive())
    }
}

/// Date filter for queries
#[derive(Debug, Clone, Default)]
pub(crate) struct DateFilter {
    pub(crate) since: Option<NaiveDate>,
    pub(crate) until: Option<NaiveDate>,
}

impl DateFilter {
    pub(crate) fn new(since: Option<NaiveDate>, until: Option<NaiveDate>) -> Self {
        Self { since, until }
    }

    pub(crate) fn is_unbounded(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }

    pub(crate) fn contains(&self, date: NaiveDate) -> bool {
        if let Some(s) = self.since
            && date < s
        {
            return false;
        }
        if let Some(u) = self.until
            && date > u
        {
            return false;
        }
        true
    }

    /// Undated reports only pass an unbounded filter.
    pub(crate) fn matches(&self, report: &Report) -> bool {
        if self.is_unbounded() {
            return true;
        }
        report.created_date().is_some_and(|d| self.contains(d))
    }
}
