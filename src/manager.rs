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

//! The manager facade: inventory queries plus the install, activate and
//! uninstall operations.
//!
//! Queries are stateless rebuilds from the filesystem; the only in-memory
//! state is the last activated identifier (a resolver hint) and the set of
//! identifiers with an operation in flight. Mutating operations on the
//! same identifier are serialized by that set: a second caller gets
//! `OperationInProgress` instead of racing the first.

use crate::catalog::{Catalog, CatalogEntry};
use crate::config::JdkmanConfig;
use crate::error::{JdkmanError, Result};
use crate::exec::{CommandRunner, SystemCommandRunner};
use crate::install::Installer;
use crate::models::{InstallOutcome, InstallationRecord, ProgressSink, SwitchOutcome};
use crate::platform::JAVA_HOME_VAR;
use crate::probe::{Prober, reconcile};
use crate::resolver::{ActiveVersionResolver, is_active_path};
use crate::switch::EnvironmentSwitcher;
use crate::uninstall;
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub struct JdkManager {
    config: JdkmanConfig,
    catalog: Catalog,
    runner: Arc<dyn CommandRunner>,
    last_activated: Mutex<Option<String>>,
    in_flight: Mutex<HashSet<String>>,
}

impl JdkManager {
    pub fn new() -> Result<Self> {
        let config = JdkmanConfig::new()?;
        Ok(Self::with_runner(config, Arc::new(SystemCommandRunner)))
    }

    pub fn with_runner(config: JdkmanConfig, runner: Arc<dyn CommandRunner>) -> Self {
        let catalog = config.catalog();
        Self {
            config,
            catalog,
            runner,
            last_activated: Mutex::new(None),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn config(&self) -> &JdkmanConfig {
        &self.config
    }

    /// Distributions available for install.
    pub fn available_versions(&self) -> Vec<CatalogEntry> {
        self.catalog.entries().to_vec()
    }

    /// Rebuild the inventory of installed JDKs from the filesystem.
    ///
    /// Infallible: unreadable roots and broken runtimes contribute zero
    /// entries instead of failing the query. At most one record carries
    /// `is_active`.
    pub fn installed_versions(&self) -> Vec<InstallationRecord> {
        let prober = Prober::new(self.runner.as_ref());
        let java_home = env::var(JAVA_HOME_VAR).ok();

        let mut sources = vec![prober.probe_managed_dir(self.config.managed_dir())];
        for root in self.config.probe_roots() {
            sources.push(prober.probe_system_root(&root));
        }
        sources.push(prober.probe_java_home(java_home.as_deref()));

        let java_home_path = java_home.map(PathBuf::from);
        let mut active_claimed = false;
        reconcile(sources)
            .into_iter()
            .map(|candidate| {
                let is_active = !active_claimed
                    && is_active_path(java_home_path.as_deref(), &candidate.install_path);
                active_claimed |= is_active;
                InstallationRecord {
                    identifier: candidate.identifier,
                    install_path: candidate.install_path,
                    display_version: candidate.display_version,
                    display_name: candidate.display_name,
                    is_active,
                }
            })
            .collect()
    }

    /// The active installation, if one can be determined.
    ///
    /// When the `JAVA_HOME` comparison in `installed_versions` is
    /// inconclusive, the resolver fallback chain decides; exhausting it
    /// yields `None`, never an error.
    pub fn current_version(&self) -> Option<InstallationRecord> {
        let records = self.installed_versions();
        if let Some(active) = records.iter().find(|r| r.is_active) {
            return Some(active.clone());
        }

        let resolver = ActiveVersionResolver::new(
            self.runner.as_ref(),
            env::var(JAVA_HOME_VAR).ok().map(PathBuf::from),
            which::which("java").ok(),
            self.config.probe_roots(),
            self.last_activated.lock().ok().and_then(|g| g.clone()),
        );
        resolver.resolve(&records)
    }

    /// Install a catalog entry into the managed directory.
    pub fn install(
        &self,
        catalog_id: &str,
        progress: &mut dyn ProgressSink,
    ) -> Result<InstallOutcome> {
        let _guard = self.begin_operation(catalog_id)?;
        Installer::new(&self.config).install(&self.catalog, catalog_id, progress)
    }

    /// Make an installed JDK the active one.
    pub fn activate(&self, identifier: &str) -> Result<SwitchOutcome> {
        let _guard = self.begin_operation(identifier)?;

        let records = self.installed_versions();
        let record = records
            .iter()
            .find(|r| r.identifier == identifier)
            .ok_or_else(|| JdkmanError::NotInstalled(identifier.to_string()))?;

        let switcher =
            EnvironmentSwitcher::new(self.runner.as_ref(), self.config.managed_dir().to_path_buf());
        let outcome = switcher.switch(record)?;

        if let Ok(mut last) = self.last_activated.lock() {
            *last = Some(identifier.to_string());
        }
        Ok(outcome)
    }

    /// Remove an installed JDK. Refuses the active installation.
    pub fn uninstall(&self, identifier: &str) -> Result<()> {
        let _guard = self.begin_operation(identifier)?;

        let records = self.installed_versions();
        let mut record = records
            .iter()
            .find(|r| r.identifier == identifier)
            .ok_or_else(|| JdkmanError::NotInstalled(identifier.to_string()))?
            .clone();

        // The primary check can be inconclusive while the fallback chain
        // still identifies this installation as active.
        if !record.is_active
            && self
                .current_version()
                .is_some_and(|active| active.identifier == identifier)
        {
            record.is_active = true;
        }

        uninstall::uninstall(&record)
    }

    fn begin_operation(&self, identifier: &str) -> Result<OperationGuard<'_>> {
        let mut in_flight = self
            .in_flight
            .lock()
            .map_err(|_| JdkmanError::SystemError("in-flight operation set poisoned".to_string()))?;
        if !in_flight.insert(identifier.to_string()) {
            return Err(JdkmanError::OperationInProgress(identifier.to_string()));
        }
        Ok(OperationGuard {
            in_flight: &self.in_flight,
            key: identifier.to_string(),
        })
    }
}

/// Releases the in-flight slot on drop, on success and failure alike.
struct OperationGuard<'a> {
    in_flight: &'a Mutex<HashSet<String>>,
    key: String,
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut set) = self.in_flight.lock() {
            set.remove(&self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{FakeCommandRunner, fake_jdk_dir};
    use serial_test::serial;
    use std::path::Path;
    use tempfile::TempDir;

    fn manager_with_home(home: &Path, runner: Arc<FakeCommandRunner>) -> JdkManager {
        let config = JdkmanConfig::with_home(home.to_path_buf()).unwrap();
        JdkManager::with_runner(config, runner)
    }

    #[test]
    fn test_available_versions_come_from_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_with_home(temp_dir.path(), Arc::new(FakeCommandRunner::new()));
        let ids: Vec<String> = manager
            .available_versions()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert!(ids.contains(&"openjdk-17".to_string()));
        assert!(ids.contains(&"openjdk-21".to_string()));
    }

    #[test]
    #[serial]
    fn test_installed_versions_lists_managed_jdks() {
        unsafe {
            env::remove_var(JAVA_HOME_VAR);
        }
        let temp_dir = TempDir::new().unwrap();
        let runner = Arc::new(FakeCommandRunner::new());
        fake_jdk_dir(temp_dir.path(), "openjdk-17", &runner, "17.0.2");
        fake_jdk_dir(temp_dir.path(), "openjdk-21", &runner, "21.0.1");

        let manager = manager_with_home(temp_dir.path(), runner);
        let mut records = manager.installed_versions();
        records.sort_by(|a, b| a.identifier.cmp(&b.identifier));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identifier, "openjdk-17");
        assert!(records.iter().all(|r| !r.is_active));
    }

    #[test]
    #[serial]
    fn test_installed_versions_marks_java_home_entry_active() {
        let temp_dir = TempDir::new().unwrap();
        let runner = Arc::new(FakeCommandRunner::new());
        fake_jdk_dir(temp_dir.path(), "openjdk-17", &runner, "17.0.2");
        fake_jdk_dir(temp_dir.path(), "openjdk-21", &runner, "21.0.1");

        unsafe {
            env::set_var(JAVA_HOME_VAR, temp_dir.path().join("openjdk-21"));
        }
        let manager = manager_with_home(temp_dir.path(), runner);
        let records = manager.installed_versions();
        unsafe {
            env::remove_var(JAVA_HOME_VAR);
        }

        let active: Vec<&InstallationRecord> = records.iter().filter(|r| r.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].identifier, "openjdk-21");
    }

    #[test]
    #[serial]
    fn test_installed_versions_is_infallible_on_empty_home() {
        unsafe {
            env::remove_var(JAVA_HOME_VAR);
        }
        let temp_dir = TempDir::new().unwrap();
        let manager =
            manager_with_home(&temp_dir.path().join("missing"), Arc::new(FakeCommandRunner::new()));
        // Managed dir does not even exist yet.
        let managed_only: Vec<_> = manager
            .installed_versions()
            .into_iter()
            .filter(|r| r.install_path.starts_with(temp_dir.path()))
            .collect();
        assert!(managed_only.is_empty());
    }

    #[test]
    #[serial]
    fn test_uninstall_refuses_active_and_removes_inactive() {
        let temp_dir = TempDir::new().unwrap();
        let runner = Arc::new(FakeCommandRunner::new());
        fake_jdk_dir(temp_dir.path(), "openjdk-17", &runner, "17.0.2");
        fake_jdk_dir(temp_dir.path(), "openjdk-21", &runner, "21.0.1");

        unsafe {
            env::set_var(JAVA_HOME_VAR, temp_dir.path().join("openjdk-21"));
        }
        let manager = manager_with_home(temp_dir.path(), runner);

        let result = manager.uninstall("openjdk-21");
        assert!(matches!(result, Err(JdkmanError::ActiveInstallation(_))));
        assert!(temp_dir.path().join("openjdk-21").exists());

        manager.uninstall("openjdk-17").unwrap();
        assert!(!temp_dir.path().join("openjdk-17").exists());

        unsafe {
            env::remove_var(JAVA_HOME_VAR);
        }
    }

    #[test]
    #[serial]
    fn test_uninstall_unknown_identifier() {
        unsafe {
            env::remove_var(JAVA_HOME_VAR);
        }
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_with_home(temp_dir.path(), Arc::new(FakeCommandRunner::new()));
        let result = manager.uninstall("openjdk-99");
        assert!(matches!(result, Err(JdkmanError::NotInstalled(_))));
    }

    #[test]
    #[serial]
    #[cfg(unix)]
    fn test_activate_switches_env_and_records_hint() {
        let temp_dir = TempDir::new().unwrap();
        let runner = Arc::new(FakeCommandRunner::new());
        fake_jdk_dir(temp_dir.path(), "openjdk-17", &runner, "17.0.2");

        let saved_path = env::var(crate::platform::PATH_VAR).unwrap_or_default();
        let saved_home = env::var(JAVA_HOME_VAR).ok();

        let manager = manager_with_home(temp_dir.path(), runner);
        let outcome = manager.activate("openjdk-17").unwrap();
        assert!(outcome.needs_restart);
        assert_eq!(
            env::var(JAVA_HOME_VAR).unwrap(),
            temp_dir.path().join("openjdk-17").to_string_lossy()
        );

        // The switch makes the installation show up as active.
        let current = manager.current_version().unwrap();
        assert_eq!(current.identifier, "openjdk-17");
        assert!(current.is_active);

        unsafe {
            env::set_var(crate::platform::PATH_VAR, saved_path);
            match saved_home {
                Some(home) => env::set_var(JAVA_HOME_VAR, home),
                None => env::remove_var(JAVA_HOME_VAR),
            }
        }
    }

    #[test]
    #[serial]
    fn test_activate_unknown_identifier() {
        unsafe {
            env::remove_var(JAVA_HOME_VAR);
        }
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_with_home(temp_dir.path(), Arc::new(FakeCommandRunner::new()));
        let result = manager.activate("openjdk-99");
        assert!(matches!(result, Err(JdkmanError::NotInstalled(_))));
    }

    #[test]
    fn test_operation_guard_serializes_same_identifier() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_with_home(temp_dir.path(), Arc::new(FakeCommandRunner::new()));

        let guard = manager.begin_operation("openjdk-17").unwrap();
        let conflict = manager.begin_operation("openjdk-17");
        assert!(matches!(conflict, Err(JdkmanError::OperationInProgress(_))));

        // Distinct identifiers do not conflict.
        let other = manager.begin_operation("openjdk-21").unwrap();
        drop(other);

        // Releasing the slot makes the identifier operable again.
        drop(guard);
        assert!(manager.begin_operation("openjdk-17").is_ok());
    }

    #[test]
    fn test_install_unknown_id_propagates_catalog_error() {
        let temp_dir = TempDir::new().unwrap();
        let manager = manager_with_home(temp_dir.path(), Arc::new(FakeCommandRunner::new()));
        let mut sink = crate::models::SilentSink;
        let result = manager.install("openjdk-99", &mut sink);
        assert!(matches!(result, Err(JdkmanError::CatalogIdNotFound(_))));
        // The guard was released by the failure.
        assert!(manager.begin_operation("openjdk-99").is_ok());
    }
}
