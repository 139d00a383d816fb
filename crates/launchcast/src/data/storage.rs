//! Data directory storage
//!
//! Directory structure:
//! ~/.launchcast/
//!   config.yaml          # Remote logging settings
//!   scenario.yaml        # Last saved assumptions
//!   launchcast.log       # Application log
//!   exports/
//!     ianalumab_model.csv

use std::fs;
use std::path::{Path, PathBuf};

use launchcast_core::export::{EXPORT_FILE_NAME, to_csv};
use launchcast_core::{InputBounds, RunRecord, ScenarioAssumptions};

use super::config::AppConfig;
use crate::util::io::atomic_write;

/// Error types for storage operations
#[derive(Debug)]
pub enum StorageError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "IO error: {}", msg),
            StorageError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Read and parse a scenario file, enforcing the input ranges
pub fn load_scenario_file(path: &Path) -> Result<ScenarioAssumptions, StorageError> {
    let content = fs::read_to_string(path)
        .map_err(|e| StorageError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    let assumptions: ScenarioAssumptions = serde_saphyr::from_str(&content)
        .map_err(|e| StorageError::Parse(format!("{}: {}", path.display(), e)))?;
    InputBounds::check(&assumptions)
        .map_err(|e| StorageError::Parse(format!("{}: {}", path.display(), e)))?;
    Ok(assumptions)
}

/// Manages the data directory
pub struct DataDirectory {
    root: PathBuf,
}

impl DataDirectory {
    /// Create a new DataDirectory instance
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the default data directory path (~/.launchcast/)
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".launchcast")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn config_path(&self) -> PathBuf {
        self.root.join("config.yaml")
    }

    fn scenario_path(&self) -> PathBuf {
        self.root.join("scenario.yaml")
    }

    fn exports_dir(&self) -> PathBuf {
        self.root.join("exports")
    }

    /// Initialize the data directory structure
    pub fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::Io(format!("Failed to create data directory: {}", e)))?;
        Ok(())
    }

    /// Load config.yaml, falling back to defaults when it does not exist
    pub fn load_config(&self) -> Result<AppConfig, StorageError> {
        let path = self.config_path();
        if !path.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| StorageError::Io(format!("Failed to read config: {}", e)))?;
        AppConfig::from_yaml(&content)
            .map_err(|e| StorageError::Parse(format!("Failed to parse config: {}", e)))
    }

    /// Load config.yaml, using the defaults if it cannot be read or parsed.
    ///
    /// The config only affects remote logging, so a broken file must not
    /// stop the forecast. The load error is returned for the caller to show.
    pub fn load_config_or_default(&self) -> (AppConfig, Option<StorageError>) {
        match self.load_config() {
            Ok(config) => (config, None),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring config.yaml, using defaults");
                (AppConfig::default(), Some(e))
            }
        }
    }

    pub fn save_config(&self, config: &AppConfig) -> Result<(), StorageError> {
        self.init()?;
        let yaml = config
            .to_yaml()
            .map_err(|e| StorageError::Serialize(format!("Failed to serialize config: {}", e)))?;
        atomic_write(&self.config_path(), &yaml)
            .map_err(|e| StorageError::Io(format!("Failed to write config: {}", e)))
    }

    /// Load the saved scenario, if one exists
    pub fn load_scenario(&self) -> Result<Option<ScenarioAssumptions>, StorageError> {
        let path = self.scenario_path();
        if !path.exists() {
            return Ok(None);
        }
        load_scenario_file(&path).map(Some)
    }

    pub fn save_scenario(
        &self,
        assumptions: &ScenarioAssumptions,
    ) -> Result<PathBuf, StorageError> {
        self.init()?;
        let yaml = serde_saphyr::to_string(assumptions).map_err(|e| {
            StorageError::Serialize(format!("Failed to serialize scenario: {}", e))
        })?;
        let path = self.scenario_path();
        atomic_write(&path, &yaml)
            .map_err(|e| StorageError::Io(format!("Failed to write scenario: {}", e)))?;
        Ok(path)
    }

    /// Write the forecast table as CSV.
    ///
    /// Goes to `dir` when given, otherwise to the `exports/` folder of the
    /// data directory. Returns the path written.
    pub fn export_csv(
        &self,
        record: &RunRecord,
        dir: Option<&Path>,
    ) -> Result<PathBuf, StorageError> {
        let dir = dir.map(Path::to_path_buf).unwrap_or_else(|| self.exports_dir());
        fs::create_dir_all(&dir)
            .map_err(|e| StorageError::Io(format!("Failed to create {}: {}", dir.display(), e)))?;

        let path = dir.join(EXPORT_FILE_NAME);
        atomic_write(&path, &to_csv(record))
            .map_err(|e| StorageError::Io(format!("Failed to write CSV: {}", e)))?;
        Ok(path)
    }
}
