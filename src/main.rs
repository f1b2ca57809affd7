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

use clap::{Parser, Subcommand};
use jdkman::commands::activate::ActivateCommand;
use jdkman::commands::available::AvailableCommand;
use jdkman::commands::current::CurrentCommand;
use jdkman::commands::install::InstallCommand;
use jdkman::commands::list::ListCommand;
use jdkman::commands::uninstall::UninstallCommand;
use jdkman::error::{Result, format_error_chain, get_exit_code};
use jdkman::logging;
use jdkman::manager::JdkManager;

#[derive(Parser)]
#[command(name = "jdkman")]
#[command(author, version, about = "JDK install and version management tool", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List JDK versions available for install
    #[command(visible_alias = "a")]
    Available {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List installed JDK versions
    #[command(visible_alias = "ls")]
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show the currently active JDK version
    Current {
        /// Show only the version number
        #[arg(short = 'q', long)]
        quiet: bool,
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Install a JDK from the catalog
    #[command(visible_alias = "i")]
    Install {
        /// Catalog id to install (e.g., "openjdk-17")
        id: String,

        /// Disable progress indicators
        #[arg(long)]
        no_progress: bool,
    },

    /// Make an installed JDK the active one
    #[command(name = "use", visible_alias = "activate")]
    Use {
        /// Identifier of the installed JDK
        id: String,
    },

    /// Uninstall an installed JDK
    #[command(visible_alias = "u", alias = "remove")]
    Uninstall {
        /// Identifier of the installed JDK
        id: String,
    },
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    let manager = match JdkManager::new() {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };

    let result: Result<()> = (|| {
        match cli.command {
            Commands::Available { json } => {
                let command = AvailableCommand::new(&manager)?;
                command.execute(json)
            }
            Commands::List { json } => {
                let command = ListCommand::new(&manager)?;
                command.execute(json)
            }
            Commands::Current { quiet, json } => {
                let command = CurrentCommand::new(&manager)?;
                command.execute(quiet, json)
            }
            Commands::Install { id, no_progress } => {
                let command = InstallCommand::new(&manager, no_progress)?;
                command.execute(&id)
            }
            Commands::Use { id } => {
                let command = ActivateCommand::new(&manager)?;
                command.execute(&id)
            }
            Commands::Uninstall { id } => {
                let command = UninstallCommand::new(&manager)?;
                command.execute(&id)
            }
        }
    })();

    if let Err(e) = result {
        eprintln!("{}", format_error_chain(&e));
        std::process::exit(get_exit_code(&e));
    }
}
