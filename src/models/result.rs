// NetMotive IP Switcher - Execution Results
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Execution result types for profile application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step completed successfully.
    Success,
    /// Step failed; later steps are not run.
    Error,
}

impl StepStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Result of a single command in an apply sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    /// Human-readable step description, e.g. "Set static address".
    pub description: String,
    /// Command line that was run.
    pub command: String,
    /// Execution status.
    pub status: StepStatus,
    /// Captured output (stdout followed by stderr).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub output: String,
    /// Execution duration in milliseconds.
    pub duration_ms: u64,
}

/// Overall result of applying a profile to an adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Profile name.
    pub profile_name: String,
    /// Target adapter.
    pub adapter: String,
    /// Individual step results.
    pub steps: Vec<StepResult>,
    /// Execution start timestamp.
    pub started_at: DateTime<Utc>,
    /// Execution end timestamp.
    pub completed_at: DateTime<Utc>,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(profile_name: impl Into<String>, adapter: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            profile_name: profile_name.into(),
            adapter: adapter.into(),
            steps: Vec::new(),
            started_at: now,
            completed_at: now,
        }
    }

    /// Add a step result.
    pub fn add_step(&mut self, step: StepResult) {
        self.steps.push(step);
    }

    /// Mark the run as finished.
    pub fn finalize(&mut self) {
        self.completed_at = Utc::now();
    }

    /// Descriptions of the steps that succeeded, in order.
    pub fn applied_steps(&self) -> Vec<String> {
        self.steps
            .iter()
            .filter(|s| s.status.is_success())
            .map(|s| s.description.clone())
            .collect()
    }

    /// Count successful steps.
    pub fn success_count(&self) -> usize {
        self.steps.iter().filter(|s| s.status.is_success()).count()
    }

    /// Check if every step succeeded.
    pub fn is_success(&self) -> bool {
        !self.steps.is_empty() && self.steps.iter().all(|s| s.status.is_success())
    }

    /// Total execution duration in milliseconds.
    pub fn total_duration_ms(&self) -> u64 {
        (self.completed_at - self.started_at).num_milliseconds().max(0) as u64
    }

    /// Summary message for notifications and the activity log.
    pub fn summary(&self) -> String {
        format!(
            "Applied '{}' to {} ({} step(s) in {} ms)",
            self.profile_name,
            self.adapter,
            self.success_count(),
            self.total_duration_ms()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(description: &str, status: StepStatus) -> StepResult {
        StepResult {
            description: description.into(),
            command: "cmd".into(),
            status,
            output: String::new(),
            duration_ms: 1,
        }
    }

    #[test]
    fn test_counts_and_applied_steps() {
        let mut result = ExecutionResult::new("Office", "Ethernet");
        result.add_step(step("Set static address", StepStatus::Success));
        result.add_step(step("Set DNS servers", StepStatus::Error));
        result.finalize();

        assert_eq!(result.success_count(), 1);
        assert!(!result.is_success());
        assert_eq!(result.applied_steps(), vec!["Set static address".to_string()]);
    }

    #[test]
    fn test_empty_result_is_not_success() {
        let result = ExecutionResult::new("Office", "Ethernet");
        assert!(!result.is_success());
    }

    #[test]
    fn test_summary() {
        let mut result = ExecutionResult::new("Office", "Ethernet");
        result.add_step(step("Set static address", StepStatus::Success));
        result.completed_at = result.started_at + chrono::Duration::milliseconds(42);
        assert_eq!(result.total_duration_ms(), 42);
        assert_eq!(result.summary(), "Applied 'Office' to Ethernet (1 step(s) in 42 ms)");
    }
}
