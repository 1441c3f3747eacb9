//! Report sources
//!
//! Each way of obtaining the report collection (exported files, the REST
//! endpoint) implements the Source trait. Loading is the only step that does
//! I/O; aggregation starts once the whole collection is in memory.

pub(crate) mod file;
pub(crate) mod http;
pub(crate) mod parser;

use std::time::Instant;

use tracing::{debug, info};

use crate::core::{DateFilter, Report, dedup_by_id};
use crate::error::AppError;

pub(crate) use file::FileSource;
pub(crate) use http::{HttpSource, reverse_geocode, set_status};

/// Report source trait - implemented by each input kind
pub(crate) trait Source {
    /// Short kind name for diagnostics
    fn name(&self) -> &'static str;

    /// Human-readable origin (path, pattern or URL)
    fn describe(&self) -> String;

    /// Fetch the full report collection
    fn load(&self) -> Result<Vec<Report>, AppError>;
}

/// Box type for dynamic dispatch
pub(crate) type BoxedSource = Box<dyn Source>;

/// Pick the source: an explicit input beats the server URL
pub(crate) fn select_source(
    input: Option<&str>,
    server: Option<&str>,
) -> Result<BoxedSource, AppError> {
    match (input, server) {
        (Some(input), _) => Ok(Box::new(FileSource::new(input))),
        (None, Some(server)) => Ok(Box::new(HttpSource::new(server))),
        (None, None) => Err(AppError::NoInput),
    }
}

/// Loading result with statistics
#[derive(Debug, Default)]
pub(crate) struct LoadResult {
    pub(crate) reports: Vec<Report>,
    /// Reports dropped because their id was already seen
    pub(crate) duplicates: usize,
    /// Reports outside the date filter
    pub(crate) filtered_out: usize,
    pub(crate) elapsed_ms: f64,
}

/// Load, deduplicate and date-filter the report collection
pub(crate) fn load_reports(source: &dyn Source, filter: &DateFilter) -> Result<LoadResult, AppError> {
    let start = Instant::now();
    debug!("Loading reports from {} ({})", source.describe(), source.name());

    let raw = source.load()?;
    let loaded = raw.len();
    let (deduped, duplicates) = dedup_by_id(raw);

    let before_filter = deduped.len();
    let reports: Vec<Report> = deduped.into_iter().filter(|r| filter.matches(r)).collect();
    let filtered_out = before_filter - reports.len();

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    info!(
        "Loaded {loaded} reports from {} ({duplicates} duplicates, {filtered_out} outside date range, {elapsed_ms:.2}ms)",
        source.describe()
    );

    Ok(LoadResult {
        reports,
        duplicates,
        filtered_out,
        elapsed_ms,
    })
}
