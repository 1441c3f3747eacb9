/// Day bucket format: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Month bucket format, zero-padded so lexicographic order is chronological: "2025-01"
pub(crate) const MONTH_FORMAT: &str = "%Y-%m";

/// Default chart palette, cycled when there are more buckets than colors
pub(crate) const DEFAULT_PALETTE: [&str; 6] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40",
];

pub(crate) const DAILY_SERIES_LABEL: &str = "Reports Submitted";
pub(crate) const DAILY_BORDER_COLOR: &str = "#36A2EB";
pub(crate) const DAILY_FILL_COLOR: &str = "rgba(54, 162, 235, 0.5)";

pub(crate) const REPORTS_PATH: &str = "/api/location/getAllReports";
pub(crate) const SET_STATUS_PATH: &str = "/api/location/setReportStatus";
pub(crate) const NOMINATIM_REVERSE_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Shown when reverse geocoding yields nothing usable
pub(crate) const ADDRESS_NOT_FOUND: &str = "Address not found";
