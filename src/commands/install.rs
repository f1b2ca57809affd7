use crate::error::Result;
use crate::manager::JdkManager;
use crate::models::{InstallProgress, InstallStage};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct InstallCommand<'a> {
    manager: &'a JdkManager,
    no_progress: bool,
}

impl<'a> InstallCommand<'a> {
    pub fn new(manager: &'a JdkManager, no_progress: bool) -> Result<Self> {
        Ok(Self {
            manager,
            no_progress,
        })
    }

    pub fn execute(&self, catalog_id: &str) -> Result<()> {
        let outcome = if self.no_progress {
            let mut sink = |progress: InstallProgress| {
                println!("[{}] {}", progress.stage, progress.message);
            };
            self.manager.install(catalog_id, &mut sink)?
        } else {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.enable_steady_tick(Duration::from_millis(100));

            let mut sink = |progress: InstallProgress| match progress.stage {
                InstallStage::Completed => spinner.finish_and_clear(),
                InstallStage::Error => spinner.abandon_with_message(progress.message),
                _ => spinner.set_message(progress.message),
            };
            let result = self.manager.install(catalog_id, &mut sink);
            if !spinner.is_finished() {
                spinner.finish_and_clear();
            }
            result?
        };

        println!("{}", outcome.message);
        if !outcome.already_installed {
            println!("Activate it with 'jdkman use {catalog_id}'.");
        }
        Ok(())
    }
}
