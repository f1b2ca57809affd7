use crate::error::Result;
use crate::manager::JdkManager;
use colored::Colorize;

pub struct ActivateCommand<'a> {
    manager: &'a JdkManager,
}

impl<'a> ActivateCommand<'a> {
    pub fn new(manager: &'a JdkManager) -> Result<Self> {
        Ok(Self { manager })
    }

    pub fn execute(&self, identifier: &str) -> Result<()> {
        let outcome = self.manager.activate(identifier)?;

        println!("{}", outcome.message.green());
        for warning in &outcome.warnings {
            eprintln!("{} {warning}", "Warning:".yellow());
        }
        if outcome.needs_restart {
            println!("Open a new terminal session for the change to take effect everywhere.");
        }
        Ok(())
    }
}
