//! Run configuration for the sampling pipeline.
//!
//! A [`SamplingConfig`] is built either programmatically with the `with_*` setters
//! or loaded from a JSON file whose only required member is `quota`:
//!
//! ```json
//! {
//!   "quota": {
//!     "GROD": { "Dams": 200, "Weirs": 100, "Locks": 100, "Partial Dams": 200 },
//!     "MRBD": { "Dams": 200, "Weirs": 200, "Locks": 300 }
//!   },
//!   "half_size": 2000
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, IoErrorExt, Result};
use crate::quota::Quota;

/// Seed used for a fresh draw when none is configured.
pub const DEFAULT_SEED: u64 = 325;

/// Seed used when topping up a reviewed selection when none is configured.
pub const GAP_FILL_SEED: u64 = 42;

/// Default footprint half-size in metres.
pub const DEFAULT_HALF_SIZE: f64 = 4000.0;

/// Default field delimiter of the input and output tables.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Default `check_results` value marking a usable accepted record.
pub const DEFAULT_VALID_STATUS: &str = "valid";

fn default_half_size() -> f64 {
    DEFAULT_HALF_SIZE
}

fn default_valid_status() -> String {
    DEFAULT_VALID_STATUS.to_string()
}

fn default_delimiter() -> char {
    char::from(DEFAULT_DELIMITER)
}

/// Convert a delimiter character to the byte the CSV reader and writer expect.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOption`] for non-ASCII delimiters.
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            ConfigError::InvalidOption {
                option: "delimiter".to_string(),
                message: format!("'{delimiter}' is not a single ASCII character"),
            }
            .into()
        })
}

/// Which sampling path a run takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// Draw the full quota from the candidate pool.
    Fresh,
    /// Draw only what a reviewed selection is still missing.
    GapFill,
}

impl SamplingMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SamplingMode::Fresh => "fresh",
            SamplingMode::GapFill => "gap-fill",
        }
    }
}

/// Configuration of one sampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Candidate table.
    #[serde(default)]
    pub input: PathBuf,
    /// Previously exported selection with `check_results`; enables gap-filling.
    #[serde(default)]
    pub accepted: Option<PathBuf>,
    /// Output table path; geometry files are derived from it.
    #[serde(default)]
    pub output: PathBuf,
    /// Required records per dataset and category.
    pub quota: Quota,
    /// Seed override; see [`SamplingConfig::effective_seed`].
    #[serde(default)]
    pub seed: Option<u64>,
    /// Half the side length of each footprint, in metres.
    #[serde(default = "default_half_size")]
    pub half_size: f64,
    /// `check_results` value that marks an accepted record as valid.
    #[serde(default = "default_valid_status")]
    pub valid_status: String,
    /// Field delimiter of the input and output tables.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl SamplingConfig {
    #[must_use]
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, quota: Quota) -> Self {
        Self {
            input: input.into(),
            accepted: None,
            output: output.into(),
            quota,
            seed: None,
            half_size: DEFAULT_HALF_SIZE,
            valid_status: default_valid_status(),
            delimiter: default_delimiter(),
        }
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::SourceError::Unreadable`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid configuration document.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_read_context("JSON", path)?;
        serde_json::from_str(&text).map_err(|source| {
            ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }
            .into()
        })
    }

    #[must_use]
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    #[must_use]
    pub fn with_accepted(mut self, accepted: impl Into<PathBuf>) -> Self {
        self.accepted = Some(accepted.into());
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_half_size(mut self, half_size: f64) -> Self {
        self.half_size = half_size;
        self
    }

    #[must_use]
    pub fn with_valid_status(mut self, status: impl Into<String>) -> Self {
        self.valid_status = status.into();
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Gap-filling when an accepted selection is configured, fresh otherwise.
    #[must_use]
    pub fn mode(&self) -> SamplingMode {
        if self.accepted.is_some() {
            SamplingMode::GapFill
        } else {
            SamplingMode::Fresh
        }
    }

    /// The configured seed, or the mode's default.
    #[must_use]
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or(match self.mode() {
            SamplingMode::Fresh => DEFAULT_SEED,
            SamplingMode::GapFill => GAP_FILL_SEED,
        })
    }

    /// The delimiter as a byte.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] for non-ASCII delimiters.
    pub fn delimiter_byte(&self) -> Result<u8> {
        delimiter_byte(self.delimiter)
    }

    /// Check the configuration before any file is touched.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a path is missing, the half-size is not a
    /// positive finite number, or the delimiter is not ASCII.
    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired {
                option: "input".to_string(),
            }
            .into());
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired {
                option: "output".to_string(),
            }
            .into());
        }
        if !self.half_size.is_finite() || self.half_size <= 0.0 {
            return Err(ConfigError::InvalidOption {
                option: "half_size".to_string(),
                message: format!("expected a positive number of metres, got {}", self.half_size),
            }
            .into());
        }
        self.delimiter_byte()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FishnetError;

    fn quota() -> Quota {
        Quota::new().with_cell("GROD", "Dams", 3)
    }

    #[test]
    fn defaults() {
        let config = SamplingConfig::new("in.csv", "out.csv", quota());
        assert_eq!(config.half_size, DEFAULT_HALF_SIZE);
        assert_eq!(config.valid_status, "valid");
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.mode(), SamplingMode::Fresh);
        assert_eq!(config.effective_seed(), DEFAULT_SEED);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn gap_fill_mode_uses_its_own_default_seed() {
        let config = SamplingConfig::new("in.csv", "out.csv", quota()).with_accepted("seen.csv");
        assert_eq!(config.mode(), SamplingMode::GapFill);
        assert_eq!(config.effective_seed(), GAP_FILL_SEED);
        assert_eq!(config.with_seed(7).effective_seed(), 7);
    }

    #[test]
    fn parse_minimal_json() {
        let config: SamplingConfig =
            serde_json::from_str(r#"{"quota": {"GROD": {"Dams": 3}}}"#).unwrap();
        assert_eq!(config.quota, quota());
        assert!(config.input.as_os_str().is_empty());
        assert_eq!(config.half_size, DEFAULT_HALF_SIZE);
        assert_eq!(config.valid_status, DEFAULT_VALID_STATUS);
        assert!(matches!(
            config.validate(),
            Err(FishnetError::Config(ConfigError::MissingRequired { .. }))
        ));
    }

    #[test]
    fn parse_full_json() {
        let config: SamplingConfig = serde_json::from_str(
            r#"{
                "input": "location_input.csv",
                "accepted": "location_with_results.csv",
                "output": "location.csv",
                "quota": {"AMBER": {"Weirs": 300}},
                "seed": 9,
                "half_size": 2000,
                "valid_status": "valid image",
                "delimiter": ";"
            }"#,
        )
        .unwrap();
        assert_eq!(config.mode(), SamplingMode::GapFill);
        assert_eq!(config.effective_seed(), 9);
        assert_eq!(config.half_size, 2000.0);
        assert_eq!(config.valid_status, "valid image");
        assert_eq!(config.delimiter_byte().unwrap(), b';');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_quota_is_a_parse_error() {
        let result: std::result::Result<SamplingConfig, _> =
            serde_json::from_str(r#"{"input": "a.csv"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_bad_half_size() {
        for half_size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = SamplingConfig::new("in.csv", "out.csv", quota()).with_half_size(half_size);
            assert!(
                matches!(
                    config.validate(),
                    Err(FishnetError::Config(ConfigError::InvalidOption { ref option, .. })) if option == "half_size"
                ),
                "half_size {half_size} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        let config = SamplingConfig::new("in.csv", "out.csv", quota()).with_delimiter('§');
        assert!(config.validate().is_err());
        assert_eq!(delimiter_byte('\t').unwrap(), b'\t');
        assert!(matches!(
            delimiter_byte('é'),
            Err(FishnetError::Config(ConfigError::InvalidOption { ref option, .. })) if option == "delimiter"
        ));
    }

    #[test]
    fn from_json_file_reports_parse_errors() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("quota.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = SamplingConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, FishnetError::Config(ConfigError::Parse { .. })));
        assert!(err.recovery_suggestion().is_some());
    }

    #[test]
    fn from_json_file_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = SamplingConfig::from_json_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, FishnetError::Source(_)));
    }
}
