//! Error type shared by the document model and the mutation API

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::status::Status;

pub type Result<T, E = SettingsError> = std::result::Result<T, E>;

/// Everything that can go wrong while loading, editing or saving the
/// configuration document.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A referenced section, entry or item key is absent
    #[error("{what} not found: {key}")]
    NotFound { what: &'static str, key: String },

    /// Missing required field or failed type coercion
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// IO failure while reading or atomically replacing the file
    #[error("failed to {action} {}: {source}", .path.display())]
    Persistence {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Malformed TOML in an existing file
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A helper program could not be started
    #[error("failed to run {program}: {source}")]
    Process {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize document: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl SettingsError {
    pub(crate) fn not_found(what: &'static str, key: impl Into<String>) -> Self {
        SettingsError::NotFound {
            what,
            key: key.into(),
        }
    }

    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SettingsError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// NotFound and Validation are expected outcomes of user input; the
    /// rest abort the operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SettingsError::NotFound { .. } | SettingsError::Validation { .. }
        )
    }

    pub fn status(&self) -> Status {
        Status::Error
    }
}
