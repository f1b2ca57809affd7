use crate::error::Result;
use crate::manager::JdkManager;
use colored::Colorize;

pub struct CurrentCommand<'a> {
    manager: &'a JdkManager,
}

impl<'a> CurrentCommand<'a> {
    pub fn new(manager: &'a JdkManager) -> Result<Self> {
        Ok(Self { manager })
    }

    pub fn execute(&self, quiet: bool, json: bool) -> Result<()> {
        let current = self.manager.current_version();

        if json {
            match &current {
                Some(record) => println!("{}", serde_json::to_string_pretty(record)?),
                None => println!("{}", serde_json::json!({ "active": null })),
            }
            return Ok(());
        }

        match current {
            Some(record) => {
                if quiet {
                    println!("{}", record.display_version);
                } else {
                    println!("{}", record.display_name.green());
                    println!("  {}", record.install_path.display());
                }
            }
            None => {
                // Not an error: "unknown" is a legitimate answer.
                if !quiet {
                    println!("No active Java version detected");
                    println!("Use 'jdkman use <id>' to activate an installed JDK");
                }
            }
        }

        Ok(())
    }
}
