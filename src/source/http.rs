//! REST collaborators: report listing, status updates and reverse geocoding

use std::time::Duration;

use serde_json::Value;
use tracing::debug;
use ureq::Agent;

use crate::consts::{ADDRESS_NOT_FOUND, NOMINATIM_REVERSE_URL, REPORTS_PATH, SET_STATUS_PATH};
use crate::core::{Location, Report};
use crate::error::AppError;
use crate::source::Source;
use crate::source::parser::parse_payload;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("safespeak/", env!("CARGO_PKG_VERSION"));

/// Non-2xx responses come back as `Ok` so the server's message can be read.
fn agent() -> Agent {
    Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(Some(REQUEST_TIMEOUT))
        .build()
        .into()
}

fn fetch_error(url: &str, err: ureq::Error) -> AppError {
    AppError::Fetch {
        url: url.to_string(),
        message: err.to_string(),
    }
}

fn base(server: &str) -> &str {
    server.trim_end_matches('/')
}

pub(crate) fn reports_url(server: &str) -> String {
    format!("{}{}", base(server), REPORTS_PATH)
}

pub(crate) fn status_url(server: &str, id: &str) -> String {
    format!("{}{}/{}", base(server), SET_STATUS_PATH, id)
}

/// The API reports failures as `{"Message": "..."}`
pub(crate) fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("Message")
        .or_else(|| value.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

pub(crate) fn display_name_from(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("display_name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Read the body and turn a non-2xx status into `AppError::Fetch`
fn read_body(url: &str, response: ureq::http::Response<ureq::Body>) -> Result<String, AppError> {
    let status = response.status();
    let mut body = response.into_body();
    let text = body.read_to_string().map_err(|e| fetch_error(url, e))?;
    if !status.is_success() {
        return Err(AppError::Fetch {
            url: url.to_string(),
            message: server_message(&text).unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
        });
    }
    Ok(text)
}

pub(crate) struct HttpSource {
    server: String,
}

impl HttpSource {
    pub(crate) fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
        }
    }
}

impl Source for HttpSource {
    fn name(&self) -> &'static str {
        "server"
    }

    fn describe(&self) -> String {
        reports_url(&self.server)
    }

    fn load(&self) -> Result<Vec<Report>, AppError> {
        let url = reports_url(&self.server);
        debug!("GET {url}");
        let response = agent()
            .get(&url)
            .header("Accept", "application/json")
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| fetch_error(&url, e))?;
        let body = read_body(&url, response)?;
        parse_payload(&body).map_err(|source| AppError::Parse { origin: url, source })
    }
}

/// Set a report's status on the server
pub(crate) fn set_status(server: &str, id: &str, status: &str) -> Result<(), AppError> {
    let url = status_url(server, id);
    debug!("POST {url}");
    let response = agent()
        .post(&url)
        .header("User-Agent", USER_AGENT)
        .send_json(serde_json::json!({ "status": status }))
        .map_err(|e| fetch_error(&url, e))?;
    read_body(&url, response)?;
    Ok(())
}

/// Resolve coordinates to a display address. Never fails: any problem yields
/// the "Address not found" placeholder.
pub(crate) fn reverse_geocode(location: &Location) -> String {
    let lat = location.latitude.to_string();
    let lon = location.longitude.to_string();
    debug!("reverse geocoding {lat},{lon}");
    let result = agent()
        .get(NOMINATIM_REVERSE_URL)
        .query("format", "json")
        .query("lat", &lat)
        .query("lon", &lon)
        .query("accept-language", "en")
        .header("User-Agent", USER_AGENT)
        .call()
        .map_err(|e| fetch_error(NOMINATIM_REVERSE_URL, e))
        .and_then(|response| read_body(NOMINATIM_REVERSE_URL, response));

    match result {
        Ok(body) => display_name_from(&body).unwrap_or_else(|| ADDRESS_NOT_FOUND.to_string()),
        Err(err) => {
            debug!("reverse geocoding failed: {err}");
            ADDRESS_NOT_FOUND.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_strip_trailing_slash() {
        assert_eq!(
            reports_url("http://localhost:4000/"),
            "http://localhost:4000/api/location/getAllReports"
        );
        assert_eq!(
            status_url("http://localhost:4000", "65a1"),
            "http://localhost:4000/api/location/setReportStatus/65a1"
        );
    }

    #[test]
    fn server_message_reads_both_casings() {
        assert_eq!(
            server_message(r#"{"Message": "Unauthorized"}"#).as_deref(),
            Some("Unauthorized")
        );
        assert_eq!(
            server_message(r#"{"message": "Not found"}"#).as_deref(),
            Some("Not found")
        );
        assert!(server_message("<html>").is_none());
    }

    #[test]
    fn display_name_extraction() {
        assert_eq!(
            display_name_from(r#"{"display_name": "Janakpuri, Delhi, India"}"#).as_deref(),
            Some("Janakpuri, Delhi, India")
        );
        assert!(display_name_from(r#"{"error": "Unable to geocode"}"#).is_none());
        assert!(display_name_from(r#"{"display_name": ""}"#).is_none());
    }

    #[test]
    fn http_source_describes_endpoint() {
        let source = HttpSource::new("https://api.safespeak.test");
        assert_eq!(source.name(), "server");
        assert_eq!(
            source.describe(),
            "https://api.safespeak.test/api/location/getAllReports"
        );
    }
}
