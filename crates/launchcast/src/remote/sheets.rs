//! Google Sheets run logger
//!
//! Appends rows with the `values:append` endpoint of the Sheets v4 API.
//! The bearer token comes from `LAUNCHCAST_SHEETS_TOKEN`; the spreadsheet id
//! from `LAUNCHCAST_SPREADSHEET_ID` or `config.yaml`.

use std::fmt;
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use serde_json::json;

use super::row::RunLogRow;
use crate::data::config::RemoteLogConfig;

pub const TOKEN_ENV: &str = "LAUNCHCAST_SHEETS_TOKEN";
pub const SPREADSHEET_ENV: &str = "LAUNCHCAST_SPREADSHEET_ID";

/// Failure of the remote logging collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalServiceError {
    /// Credentials or target spreadsheet missing
    NotConfigured(String),
    InvalidEndpoint(String),
    /// Connection, TLS or timeout failure
    Transport(String),
    /// The service answered with a non-success status
    Status { code: u16, body: String },
    Timezone(String),
}

impl fmt::Display for ExternalServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExternalServiceError::NotConfigured(what) => {
                write!(f, "remote logging is not configured: {what}")
            }
            ExternalServiceError::InvalidEndpoint(msg) => write!(f, "invalid endpoint: {msg}"),
            ExternalServiceError::Transport(msg) => write!(f, "could not reach service: {msg}"),
            ExternalServiceError::Status { code, body } => {
                write!(f, "service returned HTTP {code}: {body}")
            }
            ExternalServiceError::Timezone(msg) => write!(f, "unknown time zone {msg}"),
        }
    }
}

impl std::error::Error for ExternalServiceError {}

/// Destination for logged runs
pub trait RunSink: Send {
    fn append(&self, row: &RunLogRow) -> Result<(), ExternalServiceError>;
}

/// Resolved connection settings for the Sheets API
#[derive(Debug, Clone, PartialEq)]
pub struct SheetsTarget {
    pub endpoint: String,
    pub spreadsheet_id: String,
    pub range: String,
    pub token: String,
    pub timeout: Duration,
}

impl SheetsTarget {
    /// Combine config with credentials; `lookup` reads environment variables
    pub fn resolve(
        config: &RemoteLogConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ExternalServiceError> {
        let token = lookup(TOKEN_ENV)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                ExternalServiceError::NotConfigured(format!("{TOKEN_ENV} is not set"))
            })?;
        let spreadsheet_id = lookup(SPREADSHEET_ENV)
            .or_else(|| config.spreadsheet_id.clone())
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                ExternalServiceError::NotConfigured(format!(
                    "no spreadsheet id ({SPREADSHEET_ENV} or remote_log.spreadsheet_id)"
                ))
            })?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            spreadsheet_id,
            range: config.sheet_range.clone(),
            token,
            timeout: Duration::from_secs(config.timeout_secs.max(1)),
        })
    }

    /// `{endpoint}/{id}/values/{range}:append?valueInputOption=...`
    pub fn append_url(&self) -> Result<Url, ExternalServiceError> {
        let mut url = Url::parse(&self.endpoint).map_err(|e| {
            ExternalServiceError::InvalidEndpoint(format!("{}: {e}", self.endpoint))
        })?;
        url.path_segments_mut()
            .map_err(|_| ExternalServiceError::InvalidEndpoint(self.endpoint.clone()))?
            .pop_if_empty()
            .push(&self.spreadsheet_id)
            .push("values")
            .push(&format!("{}:append", self.range));
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED")
            .append_pair("insertDataOption", "INSERT_ROWS");
        Ok(url)
    }
}

/// Request body for a single appended row
pub fn append_body(row: &RunLogRow) -> serde_json::Value {
    json!({
        "majorDimension": "ROWS",
        "values": [row.cells()],
    })
}

/// Blocking Sheets API client
pub struct SheetsClient {
    target: SheetsTarget,
    client: Client,
}

impl SheetsClient {
    pub fn new(target: SheetsTarget) -> Result<Self, ExternalServiceError> {
        let client = Client::builder()
            .timeout(target.timeout)
            .build()
            .map_err(|e| ExternalServiceError::Transport(e.to_string()))?;
        Ok(Self { target, client })
    }

    /// Build a client from config and the process environment
    pub fn from_env(config: &RemoteLogConfig) -> Result<Self, ExternalServiceError> {
        let target = SheetsTarget::resolve(config, |key| std::env::var(key).ok())?;
        Self::new(target)
    }
}

impl RunSink for SheetsClient {
    fn append(&self, row: &RunLogRow) -> Result<(), ExternalServiceError> {
        let url = self.target.append_url()?;
        tracing::debug!(url = %url, "Appending run to spreadsheet");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.target.token)
            .json(&append_body(row))
            .send()
            .map_err(|e| ExternalServiceError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().unwrap_or_default();
        Err(ExternalServiceError::Status {
            code: status.as_u16(),
            body: body.chars().take(200).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::context::RunContext;
    use launchcast_core::{ScenarioAssumptions, compute};
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_token_is_not_configured() {
        let config = RemoteLogConfig {
            spreadsheet_id: Some("sheet".to_string()),
            ..Default::default()
        };
        let err = SheetsTarget::resolve(&config, env(&[])).unwrap_err();
        assert!(matches!(err, ExternalServiceError::NotConfigured(_)));
        assert!(err.to_string().contains(TOKEN_ENV));
    }

    #[test]
    fn test_missing_sheet_is_not_configured() {
        let err = SheetsTarget::resolve(&RemoteLogConfig::default(), env(&[(TOKEN_ENV, "t")]))
            .unwrap_err();
        assert!(matches!(err, ExternalServiceError::NotConfigured(_)));
    }

    #[test]
    fn test_env_sheet_overrides_config() {
        let config = RemoteLogConfig {
            spreadsheet_id: Some("from-config".to_string()),
            ..Default::default()
        };
        let target = SheetsTarget::resolve(
            &config,
            env(&[(TOKEN_ENV, "secret"), (SPREADSHEET_ENV, "from-env")]),
        )
        .unwrap();
        assert_eq!(target.spreadsheet_id, "from-env");
        assert_eq!(target.token, "secret");
        assert_eq!(target.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_append_url() {
        let config = RemoteLogConfig {
            spreadsheet_id: Some("abc123".to_string()),
            ..Default::default()
        };
        let target = SheetsTarget::resolve(&config, env(&[(TOKEN_ENV, "t")])).unwrap();
        let url = target.append_url().unwrap();

        assert_eq!(url.host_str(), Some("sheets.googleapis.com"));
        assert!(url.path().starts_with("/v4/spreadsheets/abc123/values/Runs!A1:append"));
        assert_eq!(
            url.query(),
            Some("valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS")
        );
    }

    #[test]
    fn test_invalid_endpoint() {
        let target = SheetsTarget {
            endpoint: "not a url".to_string(),
            spreadsheet_id: "x".to_string(),
            range: "A1".to_string(),
            token: "t".to_string(),
            timeout: Duration::from_secs(1),
        };
        assert!(matches!(
            target.append_url(),
            Err(ExternalServiceError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn test_append_body_wraps_single_row() {
        let record = compute(&ScenarioAssumptions::default()).unwrap();
        let row = RunLogRow::new(&record, &RunContext::default(), "app", "ts".to_string());
        let body = append_body(&row);

        assert_eq!(body["majorDimension"], "ROWS");
        let values = body["values"].as_array().unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0][0], "ts");
        assert_eq!(values[0][1], "app");
        assert_eq!(values[0].as_array().unwrap().len(), 18);
    }
}
