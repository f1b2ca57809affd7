use crate::error::Result;
use crate::manager::JdkManager;

pub struct UninstallCommand<'a> {
    manager: &'a JdkManager,
}

impl<'a> UninstallCommand<'a> {
    pub fn new(manager: &'a JdkManager) -> Result<Self> {
        Ok(Self { manager })
    }

    pub fn execute(&self, identifier: &str) -> Result<()> {
        self.manager.uninstall(identifier)?;
        println!("Removed {identifier}");
        Ok(())
    }
}
