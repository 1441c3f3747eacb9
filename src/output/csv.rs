use std::fmt::Write;

use crate::cli::SortOrder;
use crate::core::{DefaultLabels, Distribution, MonthlyCategorySeries, Report, TimeSeries};

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn ordered_indices(len: usize, order: SortOrder) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    if matches!(order, SortOrder::Desc) {
        indices.reverse();
    }
    indices
}

pub(crate) fn distribution_csv(key_header: &str, distribution: &Distribution) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{},reports", key_header.to_lowercase());
    for bucket in distribution.buckets() {
        let _ = writeln!(out, "{},{}", csv_escape(&bucket.label), bucket.count);
    }
    out
}

pub(crate) fn daily_csv(series: &TimeSeries, order: SortOrder) -> String {
    let mut out = String::from("date,reports\n");
    for i in ordered_indices(series.points.len(), order) {
        let point = &series.points[i];
        let _ = writeln!(out, "{},{}", point.label, point.count);
    }
    out
}

/// Wide layout: one column per category
pub(crate) fn monthly_csv(monthly: &MonthlyCategorySeries, order: SortOrder) -> String {
    let mut out = String::from("month");
    for s in &monthly.series {
        let _ = write!(out, ",{}", csv_escape(&s.category));
    }
    out.push_str(",total\n");

    for i in ordered_indices(monthly.months.len(), order) {
        out.push_str(&monthly.months[i]);
        for s in &monthly.series {
            let _ = write!(out, ",{}", s.counts.get(i).copied().unwrap_or(0));
        }
        let _ = writeln!(out, ",{}", monthly.month_total(i));
    }
    out
}

pub(crate) fn reports_csv(rows: &[&Report], labels: &DefaultLabels) -> String {
    let mut out =
        String::from("id,reported_by,category,status,created_at,latitude,longitude,description\n");
    for report in rows {
        let (lat, lon) = report
            .location
            .map(|l| (l.latitude.to_string(), l.longitude.to_string()))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            csv_escape(&report.id),
            csv_escape(labels.reporter(report)),
            csv_escape(report.category.as_deref().unwrap_or("")),
            csv_escape(labels.table_status(report)),
            csv_escape(report.created_at.as_deref().unwrap_or("")),
            lat,
            lon,
            csv_escape(&report.description),
        );
    }
    out
}
