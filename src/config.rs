//! Run configuration

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::naming::{NamingPolicy, DEFAULT_LABEL};
use crate::error::{BlindError, BlindResult};
use crate::reporting::rename_log::DEFAULT_LOG_FILE_NAME;
use crate::scanner::natural_sort::SortMode;

/// What to do when the destination folder already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationPolicy {
    /// Refuse to start; the engine creates the folder itself
    #[default]
    RequireNew,
    /// Use the folder as is, creating it when missing; same-named files are overwritten
    AllowExisting,
}

/// Settings for one blinding run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlindConfig {
    pub destination_policy: DestinationPolicy,
    pub naming: NamingPolicy,
    /// Ordering applied before batching
    pub sort_mode: SortMode,
    /// Word between the date stamp and the index
    pub label: String,
    /// Date used for the stamp; today's local date when unset
    pub run_date: Option<NaiveDate>,
    pub log_file_name: String,
}

impl Default for BlindConfig {
    fn default() -> Self {
        Self {
            destination_policy: DestinationPolicy::default(),
            naming: NamingPolicy::default(),
            sort_mode: SortMode::default(),
            label: DEFAULT_LABEL.to_string(),
            run_date: None,
            log_file_name: DEFAULT_LOG_FILE_NAME.to_string(),
        }
    }
}

impl BlindConfig {
    /// Load a JSON preset; missing fields take their defaults
    pub fn load(path: &Path) -> BlindResult<Self> {
        let file = File::open(path).map_err(|source| BlindError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file)).map_err(|source| BlindError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would otherwise produce unusable names
    pub fn validate(&self) -> BlindResult<()> {
        if let NamingPolicy::Batched { batch_size: 0 } = self.naming {
            return Err(BlindError::configuration(
                "batch_size",
                "batch size must be at least 1",
                Some("0".to_string()),
            ));
        }

        if self.label.is_empty() {
            return Err(BlindError::configuration("label", "label must not be empty", None));
        }
        if has_path_separator(&self.label) {
            return Err(BlindError::configuration(
                "label",
                "label must not contain path separators",
                Some(self.label.clone()),
            ));
        }

        if has_path_separator(&self.log_file_name) {
            return Err(BlindError::configuration(
                "log_file_name",
                "log file name must not contain path separators",
                Some(self.log_file_name.clone()),
            ));
        }
        let is_xlsx = Path::new(&self.log_file_name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
        if !is_xlsx {
            return Err(BlindError::configuration(
                "log_file_name",
                "log file name must end in .xlsx",
                Some(self.log_file_name.clone()),
            ));
        }

        Ok(())
    }
}

fn has_path_separator(value: &str) -> bool {
    value.contains('/') || value.contains('\\')
}
