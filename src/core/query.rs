//! Admin table queries: text search, status filter, sorting, duplicate removal

use std::cmp::Ordering;
use std::collections::HashSet;

use clap::ValueEnum;

use crate::core::labels::DefaultLabels;
use crate::core::types::Report;

/// Row order for the report table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReportSort {
    /// Newest first (default)
    #[default]
    Date,
    /// Category, ascending
    Category,
    /// Input order
    None,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ReportQuery {
    /// Case-insensitive substring over reporter, category and description
    pub(crate) text: Option<String>,
    /// Exact match on the raw status
    pub(crate) status: Option<String>,
    pub(crate) sort: ReportSort,
}

impl ReportQuery {
    pub(crate) fn matches(&self, report: &Report, labels: &DefaultLabels) -> bool {
        if let Some(status) = self.status.as_deref()
            && !status.is_empty()
            && report.status.as_deref() != Some(status)
        {
            return false;
        }

        let Some(text) = self.text.as_deref() else {
            return true;
        };
        let needle = text.to_lowercase();
        labels.reporter(report).to_lowercase().contains(&needle)
            || report
                .category
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(&needle)
            || report.description.to_lowercase().contains(&needle)
    }

    pub(crate) fn apply<'a>(&self, reports: &'a [Report], labels: &DefaultLabels) -> Vec<&'a Report> {
        let mut rows: Vec<&Report> = reports
            .iter()
            .filter(|r| self.matches(r, labels))
            .collect();

        match self.sort {
            ReportSort::Date => rows.sort_by(|a, b| compare_newest_first(a, b)),
            ReportSort::Category => rows.sort_by(|a, b| {
                a.category
                    .as_deref()
                    .unwrap_or("")
                    .cmp(b.category.as_deref().unwrap_or(""))
            }),
            ReportSort::None => {}
        }
        rows
    }
}

/// Newest first; reports without a usable date go last
fn compare_newest_first(a: &Report, b: &Report) -> Ordering {
    match (a.created_utc().ok(), b.created_utc().ok()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Drop reports whose id was already seen, keeping the first.
/// Reports without an id are always kept.
pub(crate) fn dedup_by_id(reports: Vec<Report>) -> (Vec<Report>, usize) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut removed = 0;
    let kept = reports
        .into_iter()
        .filter(|r| {
            if r.id.is_empty() || seen.insert(r.id.clone()) {
                true
            } else {
                removed += 1;
                false
            }
        })
        .collect();
    (kept, removed)
}

/// Find a report by id
pub(crate) fn find_report<'a>(reports: &'a [Report], id: &str) -> Option<&'a Report> {
    reports.iter().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(id: &str, category: Option<&str>, description: &str, created_at: &str) -> Report {
        Report {
            id: id.to_string(),
            category: category.map(str::to_string),
            description: description.to_string(),
            created_at: Some(created_at.to_string()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Report> {
        vec![
            Report {
                status: Some("Pending".to_string()),
                reported_by: Some("Ravi".to_string()),
                ..report("a", Some("Theft"), "bike stolen near metro", "2024-01-05T10:00:00Z")
            },
            Report {
                status: Some("Resolved".to_string()),
                ..report("b", None, "Streetlight broken", "2024-03-01T10:00:00Z")
            },
            Report {
                status: Some("Pending".to_string()),
                ..report("c", Some("Harassment"), "verbal abuse", "bad date")
            },
            report("d", Some("Assault"), "fight outside bar", "2024-02-01T10:00:00Z"),
        ]
    }

    fn ids(rows: &[&Report]) -> Vec<String> {
        rows.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn default_query_sorts_newest_first_undated_last() {
        let reports = sample();
        let rows = ReportQuery::default().apply(&reports, &DefaultLabels::default());
        assert_eq!(ids(&rows), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn text_filter_is_case_insensitive_over_three_fields() {
        let reports = sample();
        let labels = DefaultLabels::default();
        let by_category = ReportQuery {
            text: Some("THEFT".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&by_category.apply(&reports, &labels)), vec!["a"]);

        let by_description = ReportQuery {
            text: Some("streetlight".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&by_description.apply(&reports, &labels)), vec!["b"]);

        let by_reporter = ReportQuery {
            text: Some("ravi".to_string()),
            ..Default::default()
        };
        assert_eq!(ids(&by_reporter.apply(&reports, &labels)), vec!["a"]);
    }

    #[test]
    fn text_filter_matches_default_reporter() {
        let reports = sample();
        let query = ReportQuery {
            text: Some("anonymous".to_string()),
            sort: ReportSort::None,
            ..Default::default()
        };
        assert_eq!(
            ids(&query.apply(&reports, &DefaultLabels::default())),
            vec!["b", "c", "d"]
        );
    }

    #[test]
    fn status_filter_is_exact() {
        let reports = sample();
        let query = ReportQuery {
            status: Some("Pending".to_string()),
            sort: ReportSort::None,
            ..Default::default()
        };
        assert_eq!(ids(&query.apply(&reports, &DefaultLabels::default())), vec!["a", "c"]);

        let partial = ReportQuery {
            status: Some("Pend".to_string()),
            ..Default::default()
        };
        assert!(partial.apply(&reports, &DefaultLabels::default()).is_empty());
    }

    #[test]
    fn empty_status_filter_matches_all() {
        let reports = sample();
        let query = ReportQuery {
            status: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(query.apply(&reports, &DefaultLabels::default()).len(), 4);
    }

    #[test]
    fn category_sort_puts_missing_first() {
        let reports = sample();
        let query = ReportQuery {
            sort: ReportSort::Category,
            ..Default::default()
        };
        assert_eq!(
            ids(&query.apply(&reports, &DefaultLabels::default())),
            vec!["b", "d", "c", "a"]
        );
    }

    #[test]
    fn dedup_keeps_first_and_counts_removed() {
        let mut reports = sample();
        reports.push(report("a", Some("Other"), "dup", "2024-01-01"));
        reports.push(report("", None, "no id", "2024-01-01"));
        reports.push(report("", None, "no id again", "2024-01-01"));
        let (kept, removed) = dedup_by_id(reports);
        assert_eq!(removed, 1);
        assert_eq!(kept.len(), 6);
        assert_eq!(kept[0].category.as_deref(), Some("Theft"));
    }

    #[test]
    fn find_report_by_id() {
        let reports = sample();
        assert_eq!(find_report(&reports, "c").map(|r| r.id.as_str()), Some("c"));
        assert!(find_report(&reports, "zzz").is_none());
    }
}
