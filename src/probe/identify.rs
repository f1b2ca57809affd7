//! Version identification: run a discovered runtime and pull the quoted
//! version token out of its banner.

use crate::exec::CommandRunner;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Both `java -version` styles quote the version: `openjdk version "17.0.2"`
    // and `java version "1.8.0_392"`.
    PATTERN.get_or_init(|| Regex::new(r#"version "([^"]+)""#).unwrap())
}

/// Extract the quoted version token from a `java -version` banner.
pub fn extract_version_token(output: &str) -> Option<String> {
    version_pattern()
        .captures(output)
        .map(|caps| caps[1].to_string())
}

/// Run the runtime at `java_exe` and return its self-reported version.
///
/// Any failure (spawn error, non-zero exit, missing token) is logged and
/// swallowed; a bad candidate must not abort the probe of its siblings.
pub fn identify_version(runner: &dyn CommandRunner, java_exe: &Path) -> Option<String> {
    let output = match runner.run(java_exe, &["-version"]) {
        Ok(output) => output,
        Err(e) => {
            log::debug!("Failed to invoke {}: {e}", java_exe.display());
            return None;
        }
    };

    if !output.success() {
        log::debug!(
            "{} -version exited with {:?}",
            java_exe.display(),
            output.status
        );
        return None;
    }

    let combined = output.combined();
    let version = extract_version_token(&combined);
    if version.is_none() {
        log::debug!(
            "No version token in output of {}: {combined:?}",
            java_exe.display()
        );
    }
    version
}
