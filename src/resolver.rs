//! Active-version resolution.
//!
//! The primary signal is a normalized path comparison against `JAVA_HOME`.
//! When that is inconclusive, `resolve` walks a fixed fallback chain:
//! (a) the version reported by the `java` on the search path,
//! (b) `JAVA_HOME` against each known installation path,
//! (c) a direct scan of the conventional system install roots,
//! (d) the identifier recorded by the last successful activation.
//! Exhausting the chain means "no active version known", never an error.

use crate::exec::CommandRunner;
use crate::models::InstallationRecord;
use crate::platform::{java_binary_name, normalize_path_key};
use crate::probe::identify;
use std::fs;
use std::path::{Path, PathBuf};

/// Primary activity check: normalized equality with `JAVA_HOME`.
pub fn is_active_path(java_home: Option<&Path>, candidate: &Path) -> bool {
    match java_home {
        Some(home) => normalize_path_key(home) == normalize_path_key(candidate),
        None => false,
    }
}

pub struct ActiveVersionResolver<'a> {
    runner: &'a dyn CommandRunner,
    java_home: Option<PathBuf>,
    /// The `java` executable found on the default search path, if any.
    path_java: Option<PathBuf>,
    system_roots: Vec<PathBuf>,
    /// Identifier recorded by the most recent successful activation in
    /// this process.
    last_activated: Option<String>,
}

impl<'a> ActiveVersionResolver<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        java_home: Option<PathBuf>,
        path_java: Option<PathBuf>,
        system_roots: Vec<PathBuf>,
        last_activated: Option<String>,
    ) -> Self {
        Self {
            runner,
            java_home,
            path_java,
            system_roots,
            last_activated,
        }
    }

    /// Walk the fallback chain and return the first installation that
    /// matches, flagged active.
    pub fn resolve(&self, records: &[InstallationRecord]) -> Option<InstallationRecord> {
        if records.is_empty() {
            return None;
        }

        self.match_by_reported_version(records)
            .or_else(|| self.match_by_java_home(records))
            .or_else(|| self.match_by_system_root_scan(records))
            .or_else(|| self.match_by_last_activated(records))
            .map(|record| InstallationRecord {
                is_active: true,
                ..record.clone()
            })
    }

    fn match_by_reported_version<'r>(
        &self,
        records: &'r [InstallationRecord],
    ) -> Option<&'r InstallationRecord> {
        let java = self.path_java.as_ref()?;
        let version = identify::identify_version(self.runner, java)?;
        log::debug!("Search-path java reports version {version}");
        records.iter().find(|r| r.display_version == version)
    }

    fn match_by_java_home<'r>(
        &self,
        records: &'r [InstallationRecord],
    ) -> Option<&'r InstallationRecord> {
        let home = self.java_home.as_deref()?;
        records.iter().find(|r| {
            normalize_path_key(&r.install_path) == normalize_path_key(home)
        })
    }

    fn match_by_system_root_scan<'r>(
        &self,
        records: &'r [InstallationRecord],
    ) -> Option<&'r InstallationRecord> {
        for root in &self.system_roots {
            let entries = match fs::read_dir(root) {
                Ok(entries) => entries,
                Err(_) => continue,
            };
            for entry in entries.flatten() {
                let dir = entry.path();
                if !dir.join("bin").join(java_binary_name()).is_file() {
                    continue;
                }
                let key = normalize_path_key(&dir);
                if let Some(record) = records
                    .iter()
                    .find(|r| normalize_path_key(&r.install_path) == key)
                {
                    return Some(record);
                }
            }
        }
        None
    }

    fn match_by_last_activated<'r>(
        &self,
        records: &'r [InstallationRecord],
    ) -> Option<&'r InstallationRecord> {
        let identifier = self.last_activated.as_deref()?;
        records.iter().find(|r| r.identifier == identifier)
    }
}
