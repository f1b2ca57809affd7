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

//! Install workflow: fetch, verify, unpack, normalize layout, clean up.
//!
//! The workflow is a linear stage machine (`preparing` through
//! `completed`, terminal `error` reachable from any stage) reported to
//! the caller through a `ProgressSink`. Re-invoking install is safe:
//! an already-populated target directory short-circuits to `completed`
//! without a download.

pub mod download;

use crate::archive;
use crate::catalog::Catalog;
use crate::config::JdkmanConfig;
use crate::error::{JdkmanError, Result};
use crate::models::{InstallOutcome, InstallProgress, InstallStage, ProgressSink};
use crate::platform::java_binary_name;
use std::fs;
use std::path::Path;
use uuid::Uuid;

pub struct Installer<'a> {
    config: &'a JdkmanConfig,
}

impl<'a> Installer<'a> {
    pub fn new(config: &'a JdkmanConfig) -> Self {
        Self { config }
    }

    pub fn install(
        &self,
        catalog: &Catalog,
        catalog_id: &str,
        progress: &mut dyn ProgressSink,
    ) -> Result<InstallOutcome> {
        report(
            progress,
            InstallStage::Preparing,
            format!("Preparing installation of {catalog_id}..."),
        );

        let entry = match catalog.find(catalog_id) {
            Some(entry) => entry,
            None => {
                let err = JdkmanError::CatalogIdNotFound(catalog_id.to_string());
                report(progress, InstallStage::Error, err.to_string());
                return Err(err);
            }
        };

        let install_dir = self.config.managed_dir().join(&entry.id);

        // Idempotent repeat request: a populated target directory means the
        // distribution is already installed.
        if dir_is_populated(&install_dir) {
            let message = format!("{} is already installed.", entry.name);
            log::info!("{message} ({})", install_dir.display());
            report(progress, InstallStage::Completed, message.clone());
            return Ok(InstallOutcome {
                install_path: install_dir,
                message,
                already_installed: true,
            });
        }

        if let Err(e) = fs::create_dir_all(&install_dir) {
            report(progress, InstallStage::Error, e.to_string());
            return Err(e.into());
        }

        let staging = match tempfile::Builder::new().prefix("jdkman-").tempdir() {
            Ok(dir) => dir,
            Err(e) => {
                report(progress, InstallStage::Error, e.to_string());
                return Err(e.into());
            }
        };
        let archive_path = staging.path().join(format!(
            "jdk-download-{}.{}",
            Uuid::new_v4(),
            entry.archive.extension()
        ));

        report(
            progress,
            InstallStage::Downloading,
            format!("Downloading {}... (this can take several minutes)", entry.name),
        );
        if let Err(e) = download::download_archive(&entry.url, &archive_path) {
            report(progress, InstallStage::Error, e.to_string());
            return Err(e);
        }
        report(
            progress,
            InstallStage::Downloaded,
            "Download complete.".to_string(),
        );

        // The transfer can end cleanly with a truncated or empty file;
        // catch that before handing it to the extractor.
        let size = fs::metadata(&archive_path).map(|m| m.len()).unwrap_or(0);
        if size == 0 {
            let err = JdkmanError::Download {
                url: entry.url.clone(),
                reason: "downloaded file is missing or empty".to_string(),
            };
            report(progress, InstallStage::Error, err.to_string());
            return Err(err);
        }
        log::debug!("Downloaded archive: {} ({size} bytes)", archive_path.display());

        report(
            progress,
            InstallStage::Extracting,
            "Extracting files... (this can take a moment)".to_string(),
        );
        // Extraction failure is fatal for this attempt; the install
        // directory is left in place for inspection.
        if let Err(e) = archive::extract_archive(&archive_path, entry.archive, &install_dir) {
            let err = JdkmanError::Extract(e.to_string());
            report(progress, InstallStage::Error, err.to_string());
            return Err(err);
        }

        report(
            progress,
            InstallStage::Configuring,
            format!("Configuring {}...", entry.name),
        );
        if let Some(nested_root) = archive::find_nested_root(&install_dir, java_binary_name()) {
            log::info!(
                "JDK root nested at {}; normalizing layout",
                nested_root.display()
            );
            report(
                progress,
                InstallStage::Organizing,
                "Organizing JDK files...".to_string(),
            );
            if let Err(e) = archive::promote_nested_root(&nested_root, &install_dir) {
                report(progress, InstallStage::Error, e.to_string());
                return Err(e);
            }
        }

        report(
            progress,
            InstallStage::Cleaning,
            "Cleaning up temporary files...".to_string(),
        );
        if self.config.settings().install.cleanup_archives {
            // Best-effort: a leftover archive never fails the install.
            if let Err(e) = fs::remove_file(&archive_path) {
                log::warn!("Failed to remove downloaded archive: {e}");
            }
        }

        let message = format!("{} installed successfully.", entry.name);
        log::info!("{message} ({})", install_dir.display());
        report(progress, InstallStage::Completed, message.clone());

        Ok(InstallOutcome {
            install_path: install_dir,
            message,
            already_installed: false,
        })
    }
}

fn report(progress: &mut dyn ProgressSink, stage: InstallStage, message: String) {
    log::debug!("Install stage {stage}: {message}");
    progress.report(InstallProgress { stage, message });
}

fn dir_is_populated(dir: &Path) -> bool {
    match fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_some(),
        Err(_) => false,
    }
}
