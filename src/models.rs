//! Plain data exchanged with callers: inventory records, install stage
//! events and operation outcomes.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// One discovered JDK installation. Rebuilt on every inventory query;
/// never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct InstallationRecord {
    /// Stable key: directory name or catalog id. Unique within the inventory.
    pub identifier: String,
    pub install_path: PathBuf,
    /// Version string the runtime reported about itself, e.g. "17.0.2".
    pub display_version: String,
    pub display_name: String,
    /// Derived on each query, never ground truth.
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallStage {
    Preparing,
    Downloading,
    Downloaded,
    Extracting,
    Configuring,
    Organizing,
    Cleaning,
    Completed,
    Error,
}

impl fmt::Display for InstallStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstallStage::Preparing => "preparing",
            InstallStage::Downloading => "downloading",
            InstallStage::Downloaded => "downloaded",
            InstallStage::Extracting => "extracting",
            InstallStage::Configuring => "configuring",
            InstallStage::Organizing => "organizing",
            InstallStage::Cleaning => "cleaning",
            InstallStage::Completed => "completed",
            InstallStage::Error => "error",
        };
        f.write_str(name)
    }
}

/// A single progress event emitted during an install. The final event is
/// always `completed` or `error`.
#[derive(Debug, Clone)]
pub struct InstallProgress {
    pub stage: InstallStage,
    pub message: String,
}

/// Receiver for install progress events.
pub trait ProgressSink {
    fn report(&mut self, progress: InstallProgress);
}

impl<F: FnMut(InstallProgress)> ProgressSink for F {
    fn report(&mut self, progress: InstallProgress) {
        self(progress)
    }
}

/// Null-object sink for callers that do not care about progress.
pub struct SilentSink;

impl ProgressSink for SilentSink {
    fn report(&mut self, _progress: InstallProgress) {}
}

#[derive(Debug, Clone)]
pub struct InstallOutcome {
    pub install_path: PathBuf,
    pub message: String,
    /// The target directory was already populated; no download happened.
    pub already_installed: bool,
}

#[derive(Debug, Clone)]
pub struct SwitchOutcome {
    pub message: String,
    /// User-scope environment edits are invisible to already-running
    /// processes; a new session is required outside this one.
    pub needs_restart: bool,
    /// Best-effort mutations that failed. Applied mutations are not rolled
    /// back when a later one fails.
    pub warnings: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display_matches_wire_names() {
        assert_eq!(InstallStage::Preparing.to_string(), "preparing");
        assert_eq!(InstallStage::Organizing.to_string(), "organizing");
        assert_eq!(InstallStage::Completed.to_string(), "completed");
    }

    #[test]
    fn test_closure_is_a_progress_sink() {
        let mut events = Vec::new();
        {
            let mut sink = |p: InstallProgress| events.push(p.stage);
            sink.report(InstallProgress {
                stage: InstallStage::Preparing,
                message: "Preparing".to_string(),
            });
            sink.report(InstallProgress {
                stage: InstallStage::Completed,
                message: "Done".to_string(),
            });
        }
        assert_eq!(events, [InstallStage::Preparing, InstallStage::Completed]);
    }

    #[test]
    fn test_record_serializes_to_json() {
        let record = InstallationRecord {
            identifier: "openjdk-17".to_string(),
            install_path: PathBuf::from("/home/dev/.jdks/openjdk-17"),
            display_version: "17.0.2".to_string(),
            display_name: "Java 17.0.2 (openjdk-17)".to_string(),
            is_active: true,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["identifier"], "openjdk-17");
        assert_eq!(json["is_active"], true);
    }
}
