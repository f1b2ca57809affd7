// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Environment switching: point `JAVA_HOME` and `PATH` at one installation.
//!
//! Persistence targets the user scope (`setx` on Windows); the current
//! process environment is updated as well so follow-up queries in the same
//! process see the switch. Already-running sessions never do, hence
//! `needs_restart` on every successful switch. Mutations are best-effort
//! and are not rolled back when a later one fails; failures surface as
//! warnings on the outcome.

use crate::error::{JdkmanError, Result};
use crate::exec::CommandRunner;
use crate::models::{InstallationRecord, SwitchOutcome};
use crate::platform::{JAVA_HOME_VAR, PATH_VAR, java_binary_name, normalize_path_key, path_separator};
use regex::Regex;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Matches `PATH` entries that are the `bin` directory of a JDK under one
/// of the conventional install roots, regardless of separator style.
fn jdk_bin_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)[\\/](java|jvm|javavirtualmachines|\.jdks)[\\/][^\\/]+[\\/]bin[\\/]?$")
            .unwrap()
    })
}

fn is_jdk_bin_entry(entry: &str, managed_key: &str) -> bool {
    let key = normalize_path_key(Path::new(entry));
    if !key.ends_with("bin") {
        return false;
    }
    key.starts_with(managed_key) || jdk_bin_pattern().is_match(entry)
}

/// Rebuild a `PATH` value: strip every recognizable JDK `bin` entry, then
/// prepend the new one. Entries that merely contain a stray `java` binary
/// but do not match the JDK layout are left alone.
pub fn recompute_path(current: &str, new_bin: &Path, managed_dir: &Path) -> String {
    let sep = path_separator();
    let managed_key = normalize_path_key(managed_dir);

    let mut entries = vec![new_bin.to_string_lossy().into_owned()];
    entries.extend(
        current
            .split(sep)
            .filter(|e| !e.trim().is_empty())
            .filter(|e| !is_jdk_bin_entry(e, &managed_key))
            .map(str::to_string),
    );

    entries.join(&sep.to_string())
}

pub struct EnvironmentSwitcher<'a> {
    runner: &'a dyn CommandRunner,
    managed_dir: PathBuf,
}

impl<'a> EnvironmentSwitcher<'a> {
    pub fn new(runner: &'a dyn CommandRunner, managed_dir: PathBuf) -> Self {
        Self { runner, managed_dir }
    }

    /// Make `record` the active installation for the user.
    pub fn switch(&self, record: &InstallationRecord) -> Result<SwitchOutcome> {
        let java_home = &record.install_path;
        let new_bin = java_home.join("bin");
        if !new_bin.join(java_binary_name()).is_file() {
            return Err(JdkmanError::ValidationError(format!(
                "{} has no runtime executable under {}",
                record.identifier,
                new_bin.display()
            )));
        }

        let current_path = env::var(PATH_VAR).unwrap_or_default();
        let new_path = recompute_path(&current_path, &new_bin, &self.managed_dir);

        let mut warnings = Vec::new();
        self.persist(java_home, &new_path, &mut warnings);

        // Mirror into this process so subsequent queries here agree with
        // what was just persisted.
        unsafe {
            env::set_var(JAVA_HOME_VAR, java_home);
            env::set_var(PATH_VAR, &new_path);
        }

        log::info!(
            "Switched {JAVA_HOME_VAR} to {} ({})",
            java_home.display(),
            record.display_name
        );

        Ok(SwitchOutcome {
            message: format!("Now using {}.", record.display_name),
            needs_restart: true,
            warnings,
        })
    }

    #[cfg(windows)]
    fn persist(&self, java_home: &Path, new_path: &str, warnings: &mut Vec<String>) {
        let setx = Path::new("setx");
        let home_value = java_home.to_string_lossy();

        match self.runner.run(setx, &[JAVA_HOME_VAR, &home_value]) {
            Ok(output) if output.success() => {}
            Ok(output) => warnings.push(format!(
                "Failed to persist {JAVA_HOME_VAR}: {}",
                output.combined().trim()
            )),
            Err(e) => warnings.push(format!("Failed to persist {JAVA_HOME_VAR}: {e}")),
        }

        // setx truncates values beyond 1024 characters; warn instead of
        // silently corrupting the user PATH.
        if new_path.len() > 1024 {
            warnings.push(format!(
                "User {PATH_VAR} exceeds the setx limit; update it manually to include {}",
                java_home.join("bin").display()
            ));
            return;
        }

        match self.runner.run(setx, &[PATH_VAR, new_path]) {
            Ok(output) if output.success() => {}
            Ok(output) => warnings.push(format!(
                "Failed to persist {PATH_VAR}: {}",
                output.combined().trim()
            )),
            Err(e) => warnings.push(format!("Failed to persist {PATH_VAR}: {e}")),
        }
    }

    #[cfg(not(windows))]
    fn persist(&self, java_home: &Path, _new_path: &str, warnings: &mut Vec<String>) {
        // No user-scope registry on this platform; leave shell profiles to
        // the user.
        let _ = &self.runner;
        warnings.push(format!(
            "Environment changes apply to this process only; add 'export {JAVA_HOME_VAR}={}' to your shell profile to persist them",
            java_home.display()
        ));
    }
}
