// NetMotive IP Switcher - Error Types
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Shared error types for the IP Switcher application.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for IP Switcher operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for IP Switcher operations.
#[derive(Debug, Error)]
pub enum Error {
    // ========================================
    // Profile Errors
    // ========================================
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Profile already exists: {0}")]
    ProfileAlreadyExists(String),

    // ========================================
    // Validation Errors
    // ========================================
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Invalid {field}: '{value}' is not a valid IPv4 address")]
    InvalidIpAddress { field: &'static str, value: String },

    #[error("Invalid DNS server: '{0}' is not a valid IPv4 address")]
    InvalidDnsServer(String),

    // ========================================
    // Storage Errors
    // ========================================
    #[error("Failed to save profiles to {}: {reason}", .path.display())]
    PersistenceFailed { path: PathBuf, reason: String },

    #[error("Failed to read configuration: {0}")]
    ConfigReadFailed(String),

    #[error("Failed to write configuration: {0}")]
    ConfigWriteFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParseFailed(String),

    #[error("Malformed profiles data: {0}")]
    MalformedProfiles(String),

    #[error("Import failed: {0}")]
    ImportFailed(String),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    // ========================================
    // Adapter / Apply Errors
    // ========================================
    #[error("Could not list network adapters: {0}")]
    EnumerationFailed(String),

    #[error("Administrator privileges are required: {0}")]
    PrivilegeRequired(String),

    #[error("{}", describe_apply_failure(.step, .output, .applied))]
    ApplyFailed {
        /// Command line of the step that failed.
        step: String,
        /// Captured stdout/stderr of the failed step.
        output: String,
        /// Descriptions of the steps that completed before the failure.
        applied: Vec<String>,
    },

    #[error("Not supported on this system: {0}")]
    ActionNotSupported(String),
}

fn describe_apply_failure(step: &str, output: &str, applied: &[String]) -> String {
    let mut message = if applied.is_empty() {
        format!("Command failed: {}", step)
    } else {
        format!(
            "Profile partially applied ({} step(s) succeeded: {}). Command failed: {}",
            applied.len(),
            applied.join("; "),
            step
        )
    };
    let output = output.trim();
    if !output.is_empty() {
        message.push_str("\n\n");
        message.push_str(output);
    }
    message
}

impl Error {
    /// Create a new invalid IP address error for a named field.
    pub fn invalid_ip(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidIpAddress {
            field,
            value: value.into(),
        }
    }

    /// Create a new persistence error.
    pub fn persistence(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::PersistenceFailed {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if this error came from input validation.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::ValidationFailed(_) | Self::InvalidIpAddress { .. } | Self::InvalidDnsServer(_)
        )
    }

    /// Check if this error is an authorization error.
    pub fn is_authorization_error(&self) -> bool {
        matches!(self, Self::PrivilegeRequired(_))
    }

    /// Check if an apply failed after some steps had already been applied.
    pub fn is_partial_apply(&self) -> bool {
        matches!(self, Self::ApplyFailed { applied, .. } if !applied.is_empty())
    }
}

// Convert from toml parse errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParseFailed(err.to_string())
    }
}

// Convert from toml serialize errors
impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigWriteFailed(err.to_string())
    }
}

// Convert from serde_json errors (only the profiles file is JSON)
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedProfiles(err.to_string())
    }
}

// Convert from csv errors
impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::ImportFailed(err.to_string())
    }
}
