//! External inference process adapter.
//!
//! The decision process is a separate program (by default a SWI-Prolog
//! runner script) started once per call with three positional arguments:
//! stress, mood and sleep hours. It must print one JSON document on stdout:
//!
//! ```text
//! {"recommendations": ["Box breathing", "Evening wind-down"]}
//! {"error": "unknown input"}
//! ```
//!
//! A non-zero exit status or anything on stderr counts as a failure
//! regardless of stdout.

use crate::config::InferenceConfig;
use crate::InferenceError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// Source of externally inferred recommendations
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Recommendations for the given scores, de-duplicated in first-seen order
    async fn infer(
        &self,
        stress: i32,
        mood: i32,
        sleep_hours: i32,
    ) -> Result<Vec<String>, InferenceError>;
}

#[async_trait]
impl<T: InferenceEngine + ?Sized> InferenceEngine for Box<T> {
    async fn infer(
        &self,
        stress: i32,
        mood: i32,
        sleep_hours: i32,
    ) -> Result<Vec<String>, InferenceError> {
        (**self).infer(stress, mood, sleep_hours).await
    }
}

/// Pick the engine described by the config
pub fn engine_from_config(config: &InferenceConfig) -> Box<dyn InferenceEngine> {
    if config.enabled {
        Box::new(ProcessInference::from_config(config))
    } else {
        Box::new(DisabledInference)
    }
}

/// Runs the configured executable as a child process
#[derive(Clone, Debug)]
pub struct ProcessInference {
    executable: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessInference {
    pub fn new(executable: impl Into<PathBuf>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            executable: executable.into(),
            args,
            timeout,
        }
    }

    pub fn from_config(config: &InferenceConfig) -> Self {
        Self::new(config.executable.clone(), config.args.clone(), config.timeout())
    }
}

#[async_trait]
impl InferenceEngine for ProcessInference {
    #[instrument(skip(self), fields(executable = %self.executable.display()))]
    async fn infer(
        &self,
        stress: i32,
        mood: i32,
        sleep_hours: i32,
    ) -> Result<Vec<String>, InferenceError> {
        let mut cmd = Command::new(&self.executable);
        cmd.args(&self.args)
            .arg(stress.to_string())
            .arg(mood.to_string())
            .arg(sleep_hours.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the child (timeout or caller cancellation) kills it
            .kill_on_drop(true);

        debug!("Running inference process: {:?}", cmd);

        let child = cmd.spawn().map_err(|e| {
            InferenceError::Unavailable(format!(
                "failed to start '{}': {}",
                self.executable.display(),
                e
            ))
        })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| {
                InferenceError::Unavailable(format!("failed to wait for process: {}", e))
            })?,
            Err(_) => {
                warn!("Inference process exceeded {:?}, killed", self.timeout);
                return Err(InferenceError::Timeout(self.timeout));
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(InferenceError::Reported(format!(
                "exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        if !stderr.trim().is_empty() {
            return Err(InferenceError::Reported(stderr.trim().to_string()));
        }

        parse_output(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Always unavailable; used when external inference is switched off
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledInference;

#[async_trait]
impl InferenceEngine for DisabledInference {
    async fn infer(&self, _: i32, _: i32, _: i32) -> Result<Vec<String>, InferenceError> {
        Err(InferenceError::Unavailable(
            "external inference is disabled".into(),
        ))
    }
}

/// Shape of the runner's stdout document
#[derive(Debug, Deserialize)]
struct RunnerOutput {
    recommendations: Option<Vec<String>>,
    error: Option<String>,
}

/// Parse the runner's stdout
///
/// Blank output means the process had nothing to suggest.
fn parse_output(stdout: &str) -> Result<Vec<String>, InferenceError> {
    if stdout.trim().is_empty() {
        debug!("Inference process produced no output");
        return Ok(Vec::new());
    }

    let parsed: RunnerOutput = serde_json::from_str(stdout.trim())
        .map_err(|e| InferenceError::Protocol(format!("invalid JSON output: {}", e)))?;

    match parsed {
        RunnerOutput {
            recommendations: Some(recommendations),
            ..
        } => Ok(dedup_preserving_order(recommendations)),
        RunnerOutput {
            error: Some(message),
            ..
        } => Err(InferenceError::Reported(message)),
        _ => Err(InferenceError::Protocol(
            "output has neither 'recommendations' nor 'error'".into(),
        )),
    }
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
