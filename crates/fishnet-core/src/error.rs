//! Custom error types for `fishnet` operations.
//!
//! Fatal conditions (unreadable sources, failed writes, invalid configuration) are
//! modelled here with `thiserror`. A cell that cannot meet its quota is not an error:
//! it is reported as a [`crate::types::Shortfall`] and the run continues.

use std::error::Error as StdError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for `fishnet` operations.
///
/// This is the root error type that encompasses all domain-specific errors.
/// It uses `#[error(transparent)]` to delegate display formatting to the
/// underlying error variants.
#[derive(Debug, Error)]
pub enum FishnetError {
    /// An input table could not be located or parsed
    #[error(transparent)]
    Source(#[from] SourceError),

    /// An output file could not be written
    #[error(transparent)]
    Write(#[from] WriteError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading candidate or accepted records.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read or parse a source file
    #[error("Failed to read {format} file '{path}': {}", error_chain(.source.as_ref()))]
    Unreadable {
        /// The format being read (e.g., "CSV")
        format: String,
        /// The file path
        path: PathBuf,
        /// The underlying error
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// Source file does not exist
    #[error("File not found: '{path}'")]
    NotFound {
        /// The missing file path
        path: PathBuf,
    },
}

/// Errors raised while serializing outputs.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to write an output file
    #[error("Failed to write {format} file '{path}': {}", error_chain(.source.as_ref()))]
    Failed {
        /// The format being written
        format: String,
        /// The file path
        path: PathBuf,
        /// The underlying error
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

/// Configuration errors.
///
/// These errors occur when options or configuration are invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid option value
    #[error("Invalid {option} option: {message}")]
    InvalidOption {
        /// The option name
        option: String,
        /// Why it's invalid
        message: String,
    },

    /// Required option is missing
    #[error("Missing required option: {option}")]
    MissingRequired {
        /// The missing option name
        option: String,
    },

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration '{path}': {source}")]
    Parse {
        /// The configuration file path
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Type alias for Results using `FishnetError`.
pub type Result<T> = std::result::Result<T, FishnetError>;

/// Render an error followed by its `source()` chain, separated by `": "`.
fn error_chain(err: &(dyn StdError + Send + Sync + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        let message = cause.to_string();
        if !rendered.contains(&message) {
            rendered.push_str(": ");
            rendered.push_str(&message);
        }
        current = cause.source();
    }
    rendered
}

impl FishnetError {
    /// Get a user-friendly error message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Source(e) => e.user_message(),
            Self::Write(e) => e.user_message(),
            Self::Config(e) => format!("Configuration error: {e}"),
        }
    }

    /// Get recovery suggestions if available.
    #[must_use]
    pub fn recovery_suggestion(&self) -> Option<String> {
        match self {
            Self::Source(e) => e.recovery_suggestion(),
            Self::Write(_) => Some(
                "Check that the output directory exists and is writable. \
                 Files written before the failure are left in place."
                    .to_string(),
            ),
            Self::Config(ConfigError::Parse { .. }) => Some(
                "The configuration must be a JSON object with a \"quota\" member, \
                 e.g. {\"quota\": {\"GROD\": {\"Dams\": 200}}}."
                    .to_string(),
            ),
            Self::Config(_) => None,
        }
    }

    /// Check if this error is potentially recoverable.
    ///
    /// Recoverable errors might be fixed by retrying with different
    /// parameters or after the user takes some action.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl SourceError {
    fn user_message(&self) -> String {
        match self {
            Self::Unreadable { format, path, .. } => {
                format!("Failed to read {} file: {}", format, path.display())
            },
            Self::NotFound { path } => format!("File not found: {}", path.display()),
        }
    }

    fn recovery_suggestion(&self) -> Option<String> {
        match self {
            Self::NotFound { .. } => {
                Some("Check that the file path is correct and the file exists.".to_string())
            },
            Self::Unreadable { .. } => Some(
                "Check that the file has TID, Type, Lat, Lon, Country and Dataset columns \
                 and numeric coordinates."
                    .to_string(),
            ),
        }
    }
}

impl WriteError {
    fn user_message(&self) -> String {
        match self {
            Self::Failed { format, path, .. } => {
                format!("Failed to write {} file: {}", format, path.display())
            },
        }
    }
}

/// Extension trait for adding I/O context to errors.
///
/// This trait provides convenient methods to wrap errors with file and format
/// context, creating more informative error messages.
pub trait IoErrorExt<T> {
    /// Add read context to an error.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError::Unreadable`] if the underlying operation fails.
    fn with_read_context(self, format: &str, path: impl Into<PathBuf>) -> Result<T>;

    /// Add write context to an error.
    ///
    /// # Errors
    ///
    /// Returns a [`WriteError::Failed`] if the underlying operation fails.
    fn with_write_context(self, format: &str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T, E> IoErrorExt<T> for std::result::Result<T, E>
where
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    fn with_read_context(self, format: &str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| {
            FishnetError::Source(SourceError::Unreadable {
                format: format.to_string(),
                path: path.into(),
                source: e.into(),
            })
        })
    }

    fn with_write_context(self, format: &str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| {
            FishnetError::Write(WriteError::Failed {
                format: format.to_string(),
                path: path.into(),
                source: e.into(),
            })
        })
    }
}
