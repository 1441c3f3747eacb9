//! CLI subcommand definitions

use clap::Subcommand;

use crate::core::ReportSort;

/// Main CLI commands
#[derive(Debug, Clone, Default, Subcommand)]
pub(crate) enum Commands {
    /// Reports per category (default)
    #[default]
    Category,
    /// Reports per status
    Status,
    /// Reports per day (UTC)
    Daily,
    /// Reports per month and category
    Monthly,
    /// Reports per location
    Location,
    /// Category, daily and status views together
    Dashboard,
    /// List reports for triage
    Reports {
        /// Case-insensitive search over reporter, category and description
        #[arg(short, long)]
        filter: Option<String>,

        /// Only reports with exactly this status
        #[arg(long)]
        status: Option<String>,

        /// Row order
        #[arg(long, value_enum, default_value = "date")]
        sort: ReportSort,
    },
    /// Show one report in detail
    Show {
        /// Report id
        id: String,

        /// Resolve the coordinates to an address (OpenStreetMap Nominatim)
        #[arg(long)]
        address: bool,
    },
    /// Set a report's status on the server
    SetStatus {
        /// Report id
        id: String,

        /// New status, e.g. "Resolved"
        status: String,
    },
}

impl Commands {
    /// Commands that only talk to the server and never load reports
    pub(crate) fn is_remote_only(&self) -> bool {
        matches!(self, Commands::SetStatus { .. })
    }

    /// Commands that render counts over the whole collection
    pub(crate) fn is_aggregate_view(&self) -> bool {
        matches!(
            self,
            Commands::Category
                | Commands::Status
                | Commands::Daily
                | Commands::Monthly
                | Commands::Location
                | Commands::Dashboard
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_are_not_aggregate_views() {
        assert!(Commands::Category.is_aggregate_view());
        assert!(Commands::Dashboard.is_aggregate_view());
        let show = Commands::Show {
            id: "a1".to_string(),
            address: false,
        };
        assert!(!show.is_aggregate_view());
        assert!(!Commands::default().is_remote_only());
    }
}
