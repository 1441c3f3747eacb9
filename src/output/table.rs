use comfy_table::{Cell, Color, Table};

use crate::cli::SortOrder;
use crate::core::{DefaultLabels, Distribution, MonthlyCategorySeries, Report, TimeSeries};
use crate::output::format::{
    create_styled_table, format_count, format_share, header_cell, right_cell, styled_cell,
    truncate,
};

const DESCRIPTION_WIDTH: usize = 48;

#[derive(Debug, Clone, Copy)]
pub(crate) struct TableOptions {
    /// Applies to date-keyed tables; distributions keep first-seen order
    pub(crate) order: SortOrder,
    pub(crate) use_color: bool,
}

fn total_color(opts: &TableOptions) -> Option<Color> {
    opts.use_color.then_some(Color::Yellow)
}

/// Counts shown under a table
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SummaryCounts {
    pub(crate) reports: usize,
    /// Reports left out of a date-keyed view
    pub(crate) skipped: usize,
    pub(crate) duplicates: usize,
    pub(crate) filtered_out: usize,
}

fn summary_text(counts: &SummaryCounts) -> String {
    let mut stats_text = format!("{} reports", format_count(counts.reports as u64));
    let mut notes = Vec::new();
    if counts.skipped > 0 {
        notes.push(format!("{} without a valid date", format_count(counts.skipped as u64)));
    }
    if counts.duplicates > 0 {
        notes.push(format!("{} duplicates removed", format_count(counts.duplicates as u64)));
    }
    if counts.filtered_out > 0 {
        notes.push(format!(
            "{} outside date range",
            format_count(counts.filtered_out as u64)
        ));
    }
    if !notes.is_empty() {
        stats_text.push_str(&format!(" ({})", notes.join(", ")));
    }
    stats_text
}

/// Print the summary line with optional timing
pub(crate) fn print_summary_line(counts: &SummaryCounts, elapsed_ms: Option<f64>, use_color: bool) {
    let stats_text = summary_text(counts);

    if let Some(ms) = elapsed_ms {
        if use_color {
            println!("\n  {} | \x1b[36m{:.0}ms\x1b[0m\n", stats_text, ms);
        } else {
            println!("\n  {} | {:.0}ms\n", stats_text, ms);
        }
    } else {
        println!("\n  {}\n", stats_text);
    }
}

fn ordered<T>(items: &[T], order: SortOrder) -> Vec<(usize, &T)> {
    let mut rows: Vec<(usize, &T)> = items.iter().enumerate().collect();
    if matches!(order, SortOrder::Desc) {
        rows.reverse();
    }
    rows
}

pub(crate) fn build_distribution_table(
    key_header: &str,
    distribution: &Distribution,
    opts: &TableOptions,
) -> Table {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell(key_header, c),
        header_cell("Reports", c),
        header_cell("Share", c),
    ]);

    let total = distribution.total();
    for bucket in distribution.buckets() {
        table.add_row(vec![
            Cell::new(&bucket.label),
            right_cell(&format_count(bucket.count), None, false),
            right_cell(&format_share(bucket.count, total), None, false),
        ]);
    }

    let color = total_color(opts);
    table.add_row(vec![
        styled_cell("Total", color, true),
        right_cell(&format_count(total), color, true),
        right_cell("", None, false),
    ]);
    table
}

pub(crate) fn build_daily_table(series: &TimeSeries, opts: &TableOptions) -> Table {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![header_cell("Date", c), header_cell("Reports", c)]);

    for (_, point) in ordered(&series.points, opts.order) {
        table.add_row(vec![
            Cell::new(&point.label),
            right_cell(&format_count(point.count), None, false),
        ]);
    }

    let color = total_color(opts);
    table.add_row(vec![
        styled_cell("Total", color, true),
        right_cell(&format_count(series.total()), color, true),
    ]);
    table
}

pub(crate) fn build_monthly_table(monthly: &MonthlyCategorySeries, opts: &TableOptions) -> Table {
    let c = opts.use_color;
    let mut table = create_styled_table();
    let mut header = vec![header_cell("Month", c)];
    header.extend(monthly.series.iter().map(|s| header_cell(&s.category, c)));
    header.push(header_cell("Total", c));
    table.set_header(header);

    let mut grand_total = 0;
    for (idx, month) in ordered(&monthly.months, opts.order) {
        let mut row = vec![Cell::new(month)];
        for s in &monthly.series {
            let count = s.counts.get(idx).copied().unwrap_or(0);
            row.push(right_cell(&format_count(count), None, false));
        }
        let month_total = monthly.month_total(idx);
        grand_total += month_total;
        row.push(right_cell(&format_count(month_total), None, true));
        table.add_row(row);
    }

    let color = total_color(opts);
    let mut total_row = vec![styled_cell("Total", color, true)];
    for s in &monthly.series {
        let category_total: u64 = s.counts.iter().sum();
        total_row.push(right_cell(&format_count(category_total), color, true));
    }
    total_row.push(right_cell(&format_count(grand_total), color, true));
    table.add_row(total_row);
    table
}

fn created_label(report: &Report) -> String {
    match report.created_utc() {
        Ok(ts) => ts.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => report.created_at.clone().unwrap_or_else(|| "-".to_string()),
    }
}

pub(crate) fn build_reports_table(rows: &[&Report], labels: &DefaultLabels, opts: &TableOptions) -> Table {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("ID", c),
        header_cell("Reported By", c),
        header_cell("Category", c),
        header_cell("Status", c),
        header_cell("Created (UTC)", c),
        header_cell("Description", c),
    ]);

    for report in rows {
        let status_color = match (c, report.status.is_some()) {
            (true, false) => Some(Color::DarkGrey),
            _ => None,
        };
        table.add_row(vec![
            Cell::new(&report.id),
            Cell::new(labels.reporter(report)),
            Cell::new(report.category.as_deref().unwrap_or("")),
            styled_cell(labels.table_status(report), status_color, false),
            Cell::new(created_label(report)),
            Cell::new(truncate(&report.description, DESCRIPTION_WIDTH)),
        ]);
    }
    table
}

pub(crate) fn build_report_detail(
    report: &Report,
    labels: &DefaultLabels,
    address: Option<&str>,
    use_color: bool,
) -> Table {
    let mut table = create_styled_table();
    let field = |name: &str| header_cell(name, use_color);

    table.add_row(vec![field("ID"), Cell::new(&report.id)]);
    table.add_row(vec![field("Reported By"), Cell::new(labels.reporter(report))]);
    table.add_row(vec![field("Category"), Cell::new(labels.category(report))]);
    table.add_row(vec![field("Status"), Cell::new(labels.table_status(report))]);
    table.add_row(vec![field("Created (UTC)"), Cell::new(created_label(report))]);
    let location = report
        .location
        .map_or_else(|| labels.location.clone(), |l| l.to_string());
    table.add_row(vec![field("Location"), Cell::new(location)]);
    if let Some(address) = address {
        table.add_row(vec![field("Address"), Cell::new(address)]);
    }
    table.add_row(vec![field("Description"), Cell::new(&report.description)]);
    if !report.files.is_empty() {
        table.add_row(vec![field("Files"), Cell::new(report.files.join("\n"))]);
    }
    table
}

pub(crate) fn print_titled(title: &str, table: &Table) {
    println!("\n  {title}\n");
    println!("{table}");
}
