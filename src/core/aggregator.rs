//! Report aggregation
//!
//! Turns a flat report collection into labeled count buckets. Every function
//! here is pure: no I/O, no shared state, same input gives the same output.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::consts::{DATE_FORMAT, MONTH_FORMAT};
use crate::core::labels::DefaultLabels;
use crate::core::types::Report;
use crate::utils::Timezone;

/// Known coordinate keys ("28.7041_77.1025") mapped to place names
pub(crate) type LocationNames = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Bucket {
    pub(crate) label: String,
    pub(crate) count: u64,
}

/// Label -> count, in first-seen label order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Distribution {
    buckets: Vec<Bucket>,
    index: HashMap<String, usize>,
}

impl Distribution {
    pub(crate) fn increment(&mut self, label: &str) {
        match self.index.get(label) {
            Some(&i) => self.buckets[i].count += 1,
            None => {
                self.index.insert(label.to_string(), self.buckets.len());
                self.buckets.push(Bucket {
                    label: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    pub(crate) fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    #[cfg(test)]
    pub(crate) fn get(&self, label: &str) -> u64 {
        self.index
            .get(label)
            .map_or(0, |&i| self.buckets[i].count)
    }

    pub(crate) fn total(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).sum()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.buckets.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Day buckets in ascending key order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TimeSeries {
    pub(crate) points: Vec<Bucket>,
    /// Reports left out because `createdAt` was missing or unparseable
    pub(crate) skipped: usize,
}

impl TimeSeries {
    pub(crate) fn total(&self) -> u64 {
        self.points.iter().map(|p| p.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CategorySeries {
    pub(crate) category: String,
    /// One count per month, aligned with `MonthlyCategorySeries::months`
    pub(crate) counts: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MonthlyCategorySeries {
    /// Zero-padded "YYYY-MM" keys, ascending
    pub(crate) months: Vec<String>,
    pub(crate) series: Vec<CategorySeries>,
    pub(crate) skipped: usize,
}

impl MonthlyCategorySeries {
    pub(crate) fn month_total(&self, month_idx: usize) -> u64 {
        self.series
            .iter()
            .filter_map(|s| s.counts.get(month_idx))
            .sum()
    }
}

pub(crate) fn aggregate_by_category(reports: &[Report], labels: &DefaultLabels) -> Distribution {
    let mut distribution = Distribution::default();
    for report in reports {
        distribution.increment(labels.category(report));
    }
    distribution
}

pub(crate) fn aggregate_by_status(reports: &[Report], labels: &DefaultLabels) -> Distribution {
    let mut distribution = Distribution::default();
    for report in reports {
        distribution.increment(labels.status(report));
    }
    distribution
}

/// Count reports per UTC calendar day
pub(crate) fn aggregate_daily(reports: &[Report]) -> TimeSeries {
    let mut days: BTreeMap<String, u64> = BTreeMap::new();
    let mut skipped = 0;

    for report in reports {
        match report.created_utc() {
            Ok(ts) => *days.entry(ts.format(DATE_FORMAT).to_string()).or_default() += 1,
            Err(err) => {
                debug!("excluded from daily series: {err}");
                skipped += 1;
            }
        }
    }

    TimeSeries {
        points: days
            .into_iter()
            .map(|(label, count)| Bucket { label, count })
            .collect(),
        skipped,
    }
}

/// Count reports per month and category.
///
/// Every category seen in the input gets a series, including categories whose
/// only reports carry no usable date.
pub(crate) fn aggregate_monthly_by_category(
    reports: &[Report],
    labels: &DefaultLabels,
    timezone: Timezone,
) -> MonthlyCategorySeries {
    let mut months: BTreeMap<String, HashMap<&str, u64>> = BTreeMap::new();
    let mut categories: Vec<&str> = Vec::new();
    let mut skipped = 0;

    for report in reports {
        let category = labels.category(report);
        if !categories.contains(&category) {
            categories.push(category);
        }

        match report.created_utc() {
            Ok(ts) => {
                let month = timezone.to_fixed_offset(ts).format(MONTH_FORMAT).to_string();
                *months.entry(month).or_default().entry(category).or_default() += 1;
            }
            Err(err) => {
                debug!("excluded from monthly series: {err}");
                skipped += 1;
            }
        }
    }

    let series = categories
        .iter()
        .map(|category| CategorySeries {
            category: (*category).to_string(),
            counts: months
                .values()
                .map(|per_category| per_category.get(category).copied().unwrap_or(0))
                .collect(),
        })
        .collect();

    MonthlyCategorySeries {
        months: months.into_keys().collect(),
        series,
        skipped,
    }
}

/// Count reports per raw location, or per known place name when the
/// coordinates appear in `names`
pub(crate) fn aggregate_by_location(
    reports: &[Report],
    labels: &DefaultLabels,
    names: &LocationNames,
) -> Distribution {
    let mut distribution = Distribution::default();
    for report in reports {
        match &report.location {
            Some(location) => match names.get(&location.lookup_key()) {
                Some(name) => distribution.increment(name),
                None => distribution.increment(&location.to_string()),
            },
            None => distribution.increment(&labels.location),
        }
    }
    distribution
}
