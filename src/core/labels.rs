//! Fallback labels for missing report fields
//!
//! Every view that needs a default for a missing field reads it from here, so
//! the dashboard and the admin table cannot silently drift apart.

use serde::Deserialize;

use crate::core::types::Report;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub(crate) struct DefaultLabels {
    pub(crate) category: String,
    /// Status label used by charts
    pub(crate) status: String,
    /// Status label used by the admin table
    pub(crate) table_status: String,
    pub(crate) location: String,
    pub(crate) reporter: String,
}

impl Default for DefaultLabels {
    fn default() -> Self {
        Self {
            category: "Uncategorized".to_string(),
            status: "Unknown".to_string(),
            table_status: "Not Specified".to_string(),
            location: "Unknown".to_string(),
            reporter: "Anonymous User".to_string(),
        }
    }
}

impl DefaultLabels {
    pub(crate) fn category<'a>(&'a self, report: &'a Report) -> &'a str {
        report.category.as_deref().unwrap_or(&self.category)
    }

    pub(crate) fn status<'a>(&'a self, report: &'a Report) -> &'a str {
        report.status.as_deref().unwrap_or(&self.status)
    }

    pub(crate) fn table_status<'a>(&'a self, report: &'a Report) -> &'a str {
        report.status.as_deref().unwrap_or(&self.table_status)
    }

    pub(crate) fn reporter<'a>(&'a self, report: &'a Report) -> &'a str {
        report.reported_by.as_deref().unwrap_or(&self.reporter)
    }
}
