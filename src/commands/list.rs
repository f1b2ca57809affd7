use crate::error::Result;
use crate::manager::JdkManager;
use comfy_table::{Cell, Color, Table};
use log::debug;

pub struct ListCommand<'a> {
    manager: &'a JdkManager,
}

impl<'a> ListCommand<'a> {
    pub fn new(manager: &'a JdkManager) -> Result<Self> {
        Ok(Self { manager })
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let records = self.manager.installed_versions();
        debug!("Inventory holds {} installation(s)", records.len());

        if json {
            println!("{}", serde_json::to_string_pretty(&records)?);
            return Ok(());
        }

        if records.is_empty() {
            println!("No JDKs installed");
            println!("Use 'jdkman install <id>' to install a JDK");
            return Ok(());
        }

        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
        table.set_header(vec![
            Cell::new(""),
            Cell::new("Identifier"),
            Cell::new("Version"),
            Cell::new("Path"),
        ]);
        for record in &records {
            let marker = if record.is_active {
                Cell::new("*").fg(Color::Green)
            } else {
                Cell::new("")
            };
            table.add_row(vec![
                marker,
                Cell::new(&record.identifier),
                Cell::new(&record.display_version),
                Cell::new(record.install_path.display().to_string()),
            ]);
        }

        println!("{table}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JdkmanConfig;
    use crate::test::{FakeCommandRunner, fake_jdk_dir};
    use serial_test::serial;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_list_no_jdks() {
        unsafe {
            std::env::remove_var(crate::platform::JAVA_HOME_VAR);
        }
        let temp_dir = TempDir::new().unwrap();
        let config = JdkmanConfig::with_home(temp_dir.path().to_path_buf()).unwrap();
        let manager = JdkManager::with_runner(config, Arc::new(FakeCommandRunner::new()));

        let command = ListCommand::new(&manager).unwrap();
        assert!(command.execute(false).is_ok());
    }

    #[test]
    #[serial]
    fn test_list_with_jdks() {
        unsafe {
            std::env::remove_var(crate::platform::JAVA_HOME_VAR);
        }
        let temp_dir = TempDir::new().unwrap();
        let runner = Arc::new(FakeCommandRunner::new());
        fake_jdk_dir(temp_dir.path(), "openjdk-17", &runner, "17.0.2");

        let config = JdkmanConfig::with_home(temp_dir.path().to_path_buf()).unwrap();
        let manager = JdkManager::with_runner(config, runner);

        let command = ListCommand::new(&manager).unwrap();
        assert!(command.execute(false).is_ok());
        assert!(command.execute(true).is_ok());
    }
}
