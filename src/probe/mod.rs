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

//! Filesystem probing: enumerate candidate JDK roots across the managed
//! directory, the conventional system roots and `JAVA_HOME`, then
//! reconcile them into a single deduplicated candidate list.
//!
//! Every failure below this layer degrades to "contributes zero
//! candidates". Nothing the prober encounters can fail an inventory query.

pub mod identify;

use crate::exec::CommandRunner;
use crate::platform::{java_binary_name, normalize_path_key};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A probed JDK root before active-state resolution.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub identifier: String,
    pub install_path: PathBuf,
    pub display_version: String,
    pub display_name: String,
}

pub struct Prober<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Prober<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Probe the manager-owned base directory: one candidate per child
    /// directory holding a runtime executable. The display name carries
    /// the directory name so managed entries are recognizable.
    pub fn probe_managed_dir(&self, managed_dir: &Path) -> Vec<Candidate> {
        self.probe_root(managed_dir, |version, dir_name| {
            format!("Java {version} ({dir_name})")
        })
    }

    /// Probe one conventional system install root.
    pub fn probe_system_root(&self, root: &Path) -> Vec<Candidate> {
        self.probe_root(root, |version, _| format!("Java {version}"))
    }

    /// Probe the directory named by `JAVA_HOME`, when set. The value is
    /// injected by the caller so the probe stays testable.
    pub fn probe_java_home(&self, java_home: Option<&str>) -> Vec<Candidate> {
        let Some(raw) = java_home else {
            return Vec::new();
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let path = PathBuf::from(trimmed);
        if !path.is_dir() {
            log::debug!("JAVA_HOME points at a missing directory: {trimmed}");
            return Vec::new();
        }

        match self.candidate_from_dir(&path, |version, _| format!("Java {version} (JAVA_HOME)")) {
            Some(candidate) => vec![candidate],
            None => Vec::new(),
        }
    }

    fn probe_root(
        &self,
        root: &Path,
        display_name: impl Fn(&str, &str) -> String,
    ) -> Vec<Candidate> {
        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("Skipping unreadable probe root {}: {e}", root.display());
                return Vec::new();
            }
        };

        let mut candidates = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            // Dot-directories hold staging data, not installations.
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with('.'))
                .unwrap_or(true)
            {
                continue;
            }
            if let Some(candidate) = self.candidate_from_dir(&path, &display_name) {
                candidates.push(candidate);
            }
        }

        candidates
    }

    fn candidate_from_dir(
        &self,
        dir: &Path,
        display_name: impl Fn(&str, &str) -> String,
    ) -> Option<Candidate> {
        let java_exe = dir.join("bin").join(java_binary_name());
        if !java_exe.is_file() {
            return None;
        }

        let version = identify::identify_version(self.runner, &java_exe)?;
        let dir_name = dir.file_name()?.to_string_lossy().into_owned();

        Some(Candidate {
            identifier: dir_name.clone(),
            install_path: dir.to_path_buf(),
            display_name: display_name(&version, &dir_name),
            display_version: version,
        })
    }
}

/// Merge candidate lists into one deduplicated inventory.
///
/// Pure function: sources are given in priority order (managed directory,
/// system roots, `JAVA_HOME`) and the output preserves source priority then
/// discovery order. A path collision keeps the first source's entry; a
/// later candidate reusing an already-claimed identifier is dropped so
/// identifiers stay unique.
pub fn reconcile(sources: Vec<Vec<Candidate>>) -> Vec<Candidate> {
    let mut seen_paths = HashSet::new();
    let mut seen_identifiers = HashSet::new();
    let mut merged = Vec::new();

    for source in sources {
        for candidate in source {
            let path_key = normalize_path_key(&candidate.install_path);
            if !seen_paths.insert(path_key) {
                continue;
            }
            if !seen_identifiers.insert(candidate.identifier.clone()) {
                log::debug!(
                    "Dropping {} at {}: identifier already claimed by a higher-priority source",
                    candidate.identifier,
                    candidate.install_path.display()
                );
                continue;
            }
            merged.push(candidate);
        }
    }

    merged
}
