// NetMotive IP Switcher - Data Models
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! # Data Models
//!
//! Shared types used by the store, the apply engine and the GUI:
//!
//! - **Profile**: Named static IPv4 configuration
//! - **Adapter**: Network adapters reported by the OS
//! - **Execution**: Result types for profile application
//! - **Config**: Application settings
//! - **Error**: Shared error types

pub mod adapter;
pub mod config;
pub mod error;
pub mod profile;
pub mod result;
pub mod validation;

// Re-export main types for convenience
pub use adapter::{AdapterInfo, AdapterType};
pub use config::{AppConfig, ThemePreference};
pub use error::{Error, Result};
pub use profile::{Profile, ProfileChanges, ProfileDraft};
pub use result::{ExecutionResult, StepResult, StepStatus};

/// Application ID (matches desktop identifiers).
pub const APP_ID: &str = "com.chrisdaggas.ip-switcher";

/// Configuration directory name (under the platform config directory).
pub const CONFIG_DIR_NAME: &str = "ip-switcher";

/// Default profiles file name inside the configuration directory.
pub const PROFILES_FILE_NAME: &str = "profiles.json";
