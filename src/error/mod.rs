mod exit_codes;
mod format;

pub use exit_codes::get_exit_code;
pub use format::{format_error_chain, format_error_with_color};

use std::io::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JdkmanError {
    #[error("'{0}' is not in the install catalog")]
    CatalogIdNotFound(String),

    #[error("JDK '{0}' is not installed")]
    NotInstalled(String),

    #[error("Failed to download {url}: {reason}")]
    Download { url: String, reason: String },

    #[error("Failed to extract archive: {0}")]
    Extract(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("JDK '{0}' is the active installation and cannot be removed")]
    ActiveInstallation(String),

    #[error("Another operation on '{0}' is already in progress")]
    OperationInProgress(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Security error: {0}")]
    SecurityError(String),

    #[error("System error: {0}")]
    SystemError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

impl JdkmanError {
    /// URL the caller should offer for a manual browser download when an
    /// automatic fetch failed. `None` for every other error.
    pub fn manual_download_url(&self) -> Option<&str> {
        match self {
            JdkmanError::Download { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Whether the failure came from an OS access restriction, so the
    /// caller can prompt for elevated privileges instead of showing a
    /// generic error.
    pub fn requires_permission(&self) -> bool {
        match self {
            JdkmanError::PermissionDenied(_) => true,
            JdkmanError::Io(e) => e.kind() == ErrorKind::PermissionDenied,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, JdkmanError>;
