mod chart;
mod csv;
mod format;
mod json;
mod table;

pub(crate) use chart::{
    ChartKind, ChartRegistry, Palette, daily_chart, distribution_chart, monthly_chart,
    register_chart_types,
};
pub(crate) use csv::{daily_csv, distribution_csv, monthly_csv, reports_csv};
pub(crate) use json::{chart_json, dashboard_json, report_detail_json, reports_json};
pub(crate) use table::{
    SummaryCounts, TableOptions, build_daily_table, build_distribution_table, build_monthly_table,
    build_report_detail, build_reports_table, print_summary_line, print_titled,
};
