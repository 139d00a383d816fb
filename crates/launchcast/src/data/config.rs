//! Application configuration stored in `config.yaml`

use serde::{Deserialize, Serialize};

/// Default endpoint of the Google Sheets values API
pub const DEFAULT_SHEETS_ENDPOINT: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Settings for appending completed runs to a remote spreadsheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteLogConfig {
    /// Identifier written into every logged row
    pub app_id: String,
    /// Target spreadsheet; `LAUNCHCAST_SPREADSHEET_ID` takes precedence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spreadsheet_id: Option<String>,
    /// A1 range rows are appended after
    pub sheet_range: String,
    /// IANA time zone used for the row timestamp
    pub timezone: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for RemoteLogConfig {
    fn default() -> Self {
        Self {
            app_id: "launchcast".to_string(),
            spreadsheet_id: None,
            sheet_range: "Runs!A1".to_string(),
            timezone: "America/New_York".to_string(),
            endpoint: DEFAULT_SHEETS_ENDPOINT.to_string(),
            timeout_secs: 10,
        }
    }
}

/// Configuration stored in config.yaml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub remote_log: RemoteLogConfig,
}

impl AppConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_saphyr::from_str(yaml).map_err(|e| e.to_string())
    }

    pub fn to_yaml(&self) -> Result<String, String> {
        serde_saphyr::to_string(self).map_err(|e| e.to_string())
    }
}
