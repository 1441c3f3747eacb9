//! Core module - report model, label policy, aggregation and queries

mod aggregator;
mod labels;
mod query;
mod types;

#[cfg(test)]
pub(crate) use aggregator::{Bucket, CategorySeries};
pub(crate) use aggregator::{
    Distribution, LocationNames, MonthlyCategorySeries, TimeSeries,
    aggregate_by_category, aggregate_by_location, aggregate_by_status, aggregate_daily,
    aggregate_monthly_by_category,
};
pub(crate) use labels::DefaultLabels;
pub(crate) use query::{ReportQuery, ReportSort, dedup_by_id, find_report};
pub(crate) use types::{DateFilter, Location, Report};
