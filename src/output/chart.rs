//! Chart-ready data (`{labels, datasets}`) built from aggregation results

use serde::Serialize;
use std::collections::HashSet;
use std::sync::OnceLock;

use crate::consts::{DAILY_BORDER_COLOR, DAILY_FILL_COLOR, DAILY_SERIES_LABEL, DEFAULT_PALETTE};
use crate::core::{Distribution, MonthlyCategorySeries, TimeSeries};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ChartKind {
    Pie,
    Line,
    Bar,
}

impl ChartKind {
    pub(crate) fn name(self) -> &'static str {
        match self {
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
        }
    }
}

/// The chart kinds available for rendering
#[derive(Debug, Default)]
pub(crate) struct ChartRegistry {
    kinds: HashSet<ChartKind>,
}

impl ChartRegistry {
    /// Register a kind; returns false when it was already present
    pub(crate) fn register(&mut self, kind: ChartKind) -> bool {
        self.kinds.insert(kind)
    }

    pub(crate) fn with_defaults() -> Self {
        let mut registry = Self::default();
        for kind in [ChartKind::Pie, ChartKind::Line, ChartKind::Bar] {
            registry.register(kind);
        }
        registry
    }

    fn require(&self, kind: ChartKind) -> Result<(), AppError> {
        if self.kinds.contains(&kind) {
            Ok(())
        } else {
            Err(AppError::ChartNotRegistered { kind: kind.name() })
        }
    }
}

static CHARTS: OnceLock<ChartRegistry> = OnceLock::new();

/// Process-wide chart setup. Safe to call more than once.
pub(crate) fn register_chart_types() -> &'static ChartRegistry {
    CHARTS.get_or_init(ChartRegistry::with_defaults)
}

/// Ordered colors, cycled by index
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Palette {
    colors: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

impl Palette {
    /// An empty list falls back to the default palette
    pub(crate) fn new(colors: Vec<String>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    pub(crate) fn color_at(&self, index: usize) -> &str {
        &self.colors[index % self.colors.len()]
    }

    pub(crate) fn colors_for(&self, count: usize) -> Vec<String> {
        (0..count).map(|i| self.color_at(i).to_string()).collect()
    }
}

/// Stable color for a label (FNV-1a over the bytes, low 24 bits)
pub(crate) fn hash_color(label: &str) -> String {
    let mut hash: u32 = 0x811c_9dc5;
    for byte in label.bytes() {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(0x0100_0193);
    }
    format!("#{:06x}", hash & 0x00ff_ffff)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum ColorSpec {
    Single(String),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) label: Option<String>,
    pub(crate) data: Vec<u64>,
    pub(crate) background_color: ColorSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) border_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ChartData {
    #[serde(rename = "type")]
    pub(crate) kind: ChartKind,
    pub(crate) labels: Vec<String>,
    pub(crate) datasets: Vec<Dataset>,
}

/// One dataset, one palette color per bucket
pub(crate) fn distribution_chart(
    registry: &ChartRegistry,
    kind: ChartKind,
    distribution: &Distribution,
    palette: &Palette,
) -> Result<ChartData, AppError> {
    registry.require(kind)?;
    let buckets = distribution.buckets();
    Ok(ChartData {
        kind,
        labels: buckets.iter().map(|b| b.label.clone()).collect(),
        datasets: vec![Dataset {
            label: None,
            data: buckets.iter().map(|b| b.count).collect(),
            background_color: ColorSpec::PerPoint(palette.colors_for(buckets.len())),
            border_color: None,
        }],
    })
}

pub(crate) fn daily_chart(registry: &ChartRegistry, series: &TimeSeries) -> Result<ChartData, AppError> {
    registry.require(ChartKind::Line)?;
    Ok(ChartData {
        kind: ChartKind::Line,
        labels: series.points.iter().map(|p| p.label.clone()).collect(),
        datasets: vec![Dataset {
            label: Some(DAILY_SERIES_LABEL.to_string()),
            data: series.points.iter().map(|p| p.count).collect(),
            background_color: ColorSpec::Single(DAILY_FILL_COLOR.to_string()),
            border_color: Some(DAILY_BORDER_COLOR.to_string()),
        }],
    })
}

/// Grouped bar chart: one dataset per category, colored by label hash
pub(crate) fn monthly_chart(
    registry: &ChartRegistry,
    monthly: &MonthlyCategorySeries,
) -> Result<ChartData, AppError> {
    registry.require(ChartKind::Bar)?;
    Ok(ChartData {
        kind: ChartKind::Bar,
        labels: monthly.months.clone(),
        datasets: monthly
            .series
            .iter()
            .map(|s| Dataset {
                label: Some(s.category.clone()),
                data: s.counts.clone(),
                background_color: ColorSpec::Single(hash_color(&s.category)),
                border_color: None,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Bucket, CategorySeries};

    fn distribution(labels: &[&str]) -> Distribution {
        let mut d = Distribution::default();
        for label in labels {
            d.increment(label);
        }
        d
    }

    #[test]
    fn registration_is_idempotent() {
        let first = register_chart_types() as *const ChartRegistry;
        let second = register_chart_types() as *const ChartRegistry;
        assert_eq!(first, second);

        let mut registry = ChartRegistry::default();
        assert!(registry.register(ChartKind::Pie));
        assert!(!registry.register(ChartKind::Pie));
    }

    #[test]
    fn unregistered_kind_is_error() {
        let registry = ChartRegistry::default();
        let err = distribution_chart(
            &registry,
            ChartKind::Pie,
            &distribution(&["a"]),
            &Palette::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::ChartNotRegistered { kind: "pie" }));
    }

    #[test]
    fn palette_cycles() {
        let palette = Palette::default();
        assert_eq!(palette.color_at(0), "#FF6384");
        assert_eq!(palette.color_at(5), "#FF9F40");
        assert_eq!(palette.color_at(6), "#FF6384");
        assert_eq!(palette.colors_for(8).len(), 8);
    }

    #[test]
    fn empty_palette_falls_back_to_default() {
        assert_eq!(Palette::new(Vec::new()), Palette::default());
        let custom = Palette::new(vec!["#000000".to_string()]);
        assert_eq!(custom.color_at(3), "#000000");
    }

    #[test]
    fn hash_color_is_stable_and_well_formed() {
        let a = hash_color("crime");
        assert_eq!(a, hash_color("crime"));
        assert_eq!(a.len(), 7);
        assert!(a.starts_with('#'));
        assert!(a[1..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash_color("crime"), hash_color("theft"));
        // FNV-1a offset basis for the empty string
        assert_eq!(hash_color(""), "#1c9dc5");
    }

    #[test]
    fn pie_chart_json_shape() {
        let chart = distribution_chart(
            &ChartRegistry::with_defaults(),
            ChartKind::Pie,
            &distribution(&["crime", "Uncategorized", "crime"]),
            &Palette::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["type"], "pie");
        assert_eq!(json["labels"], serde_json::json!(["crime", "Uncategorized"]));
        assert_eq!(json["datasets"][0]["data"], serde_json::json!([2, 1]));
        assert_eq!(
            json["datasets"][0]["backgroundColor"],
            serde_json::json!(["#FF6384", "#36A2EB"])
        );
        assert!(json["datasets"][0].get("label").is_none());
    }

    #[test]
    fn daily_chart_has_single_labelled_dataset() {
        let series = TimeSeries {
            points: vec![
                Bucket {
                    label: "2024-01-05".to_string(),
                    count: 2,
                },
                Bucket {
                    label: "2024-02-10".to_string(),
                    count: 1,
                },
            ],
            skipped: 0,
        };
        let chart = daily_chart(&ChartRegistry::with_defaults(), &series).unwrap();
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["type"], "line");
        assert_eq!(json["datasets"][0]["label"], "Reports Submitted");
        assert_eq!(json["datasets"][0]["borderColor"], "#36A2EB");
        assert_eq!(json["datasets"][0]["backgroundColor"], "rgba(54, 162, 235, 0.5)");
    }

    #[test]
    fn monthly_chart_colors_by_category() {
        let monthly = MonthlyCategorySeries {
            months: vec!["2024-09".to_string(), "2024-10".to_string()],
            series: vec![CategorySeries {
                category: "crime".to_string(),
                counts: vec![1, 0],
            }],
            skipped: 0,
        };
        let chart = monthly_chart(&ChartRegistry::with_defaults(), &monthly).unwrap();
        assert_eq!(chart.labels, vec!["2024-09", "2024-10"]);
        assert_eq!(
            chart.datasets[0].background_color,
            ColorSpec::Single(hash_color("crime"))
        );
        assert_eq!(chart.datasets[0].label.as_deref(), Some("crime"));
    }
}
