//! Unified error handling for Brikr Core.
//!
//! A single root error type covers the whole pipeline. The domain layer
//! (merge engine, key sorting) is infallible, so there is no separate
//! domain error enum; everything that can fail is an application concern.

use std::path::PathBuf;
use thiserror::Error;

/// Root error type for Brikr Core operations.
#[derive(Debug, Error)]
pub enum BrikrError {
    /// A required option is missing or malformed.
    #[error("usage error: {message}")]
    Usage { message: String },

    /// A configuration file could not be read or parsed.
    #[error("configuration error at {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// A filesystem operation failed.
    #[error("filesystem error at {}: {reason}", path.display())]
    Filesystem { path: PathBuf, reason: String },

    /// Template rendering failed.
    #[error("render error for {}: {reason}", path.display())]
    Render { path: PathBuf, reason: String },

    /// A script/data export source could not be loaded.
    #[error("export error for {}: {reason}", path.display())]
    Export { path: PathBuf, reason: String },

    /// A configured `jsons` base is not an existing file path or an object.
    #[error("json base for `{key}` must be an existing file path or an object")]
    MergeBase { key: String },

    /// Cloning a remote brik repository failed.
    #[error("clone failed for {url}: {reason}")]
    CloneFailed { url: String, reason: String },

    /// Unexpected internal errors (bugs).
    #[error("internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl BrikrError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Usage { message } => vec![
                format!("Check your options: {message}"),
                "options.files is required and must be a path, glob, or repository reference"
                    .into(),
            ],
            Self::Config { path, .. } => vec![
                format!("Could not load config file: {}", path.display()),
                "Config files must be valid JSON".into(),
                "Check the `extends` paths for typos".into(),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::Render { path, .. } => vec![
                format!("Template failed to render: {}", path.display()),
                "Check the template for unbalanced placeholders".into(),
            ],
            Self::Export { path, .. } => vec![
                format!("Export source failed to load: {}", path.display()),
                "Export files must contain a valid JSON document".into(),
            ],
            Self::MergeBase { key } => vec![
                format!("Check the `jsons` entry for `{key}`"),
                "Values in options.jsons must be an existing file path or an object".into(),
            ],
            Self::CloneFailed { url, .. } => vec![
                format!("Could not clone: {url}"),
                "Check that git is installed and the repository is reachable".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in brikr".into(),
                "Please report this issue at: https://github.com/brikr/brikr/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Usage { .. } | Self::MergeBase { .. } => ErrorCategory::Usage,
            Self::Config { .. } => ErrorCategory::Configuration,
            Self::CloneFailed { .. } => ErrorCategory::NotFound,
            Self::Filesystem { .. }
            | Self::Render { .. }
            | Self::Export { .. }
            | Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Usage,
    Configuration,
    NotFound,
    Internal,
}

/// Convenient result type alias.
pub type BrikrResult<T> = Result<T, BrikrError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> BrikrResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> BrikrResult<T> {
        self.map_err(|e| BrikrError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_error_is_usage_category() {
        let err = BrikrError::Usage {
            message: "files missing".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Usage);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn config_error_is_configuration_category() {
        let err = BrikrError::Config {
            path: PathBuf::from("/tmp/.brikrc.json"),
            reason: "bad json".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn merge_base_suggestions_mention_jsons() {
        let err = BrikrError::MergeBase {
            key: "package.json".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("jsons")));
    }
}
