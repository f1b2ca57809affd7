use crate::error::Result;
use crate::manager::JdkManager;
use comfy_table::{Cell, Table};

pub struct AvailableCommand<'a> {
    manager: &'a JdkManager,
}

impl<'a> AvailableCommand<'a> {
    pub fn new(manager: &'a JdkManager) -> Result<Self> {
        Ok(Self { manager })
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let entries = self.manager.available_versions();

        if json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }

        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
        table.set_header(vec![Cell::new("Id"), Cell::new("Name"), Cell::new("Archive")]);
        for entry in &entries {
            table.add_row(vec![
                Cell::new(&entry.id),
                Cell::new(&entry.name),
                Cell::new(entry.archive.extension()),
            ]);
        }

        println!("{table}");
        println!();
        println!("Use 'jdkman install <id>' to install one of these.");
        Ok(())
    }
}
