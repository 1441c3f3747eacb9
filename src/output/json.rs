use serde_json::{Value, json};

use crate::core::{DefaultLabels, Report};
use crate::error::AppError;
use crate::output::chart::ChartData;

pub(crate) fn chart_json(chart: &ChartData) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(chart)?)
}

/// The analytics dashboard: category and status pies plus the daily line
pub(crate) fn dashboard_json(
    category: &ChartData,
    daily: &ChartData,
    status: &ChartData,
) -> Result<String, AppError> {
    let value = json!({
        "category": category,
        "daily": daily,
        "status": status,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

fn report_value(report: &Report, labels: &DefaultLabels) -> Value {
    json!({
        "id": report.id,
        "reportedBy": labels.reporter(report),
        "category": labels.category(report),
        "status": labels.table_status(report),
        "createdAt": report.created_at,
        "location": report.location,
        "description": report.description,
        "files": report.files,
    })
}

pub(crate) fn reports_json(rows: &[&Report], labels: &DefaultLabels) -> Result<String, AppError> {
    let output: Vec<Value> = rows.iter().map(|r| report_value(r, labels)).collect();
    Ok(serde_json::to_string_pretty(&output)?)
}

pub(crate) fn report_detail_json(
    report: &Report,
    labels: &DefaultLabels,
    address: Option<&str>,
) -> Result<String, AppError> {
    let mut value = report_value(report, labels);
    if let (Some(address), Some(obj)) = (address, value.as_object_mut()) {
        obj.insert("address".to_string(), json!(address));
    }
    Ok(serde_json::to_string_pretty(&value)?)
}
