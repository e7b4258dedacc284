//! Command-line entry point for the scenario authoring helper.

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use scenario_cli::io::assets::scaffold_assets;
use scenario_cli::io::init::init_course;
use scenario_cli::io::prompt::TerminalPrompter;
use scenario_cli::io::tree_view::TreeCommand;
use scenario_cli::{add_step, exit_codes, logging, validate};

#[derive(Parser)]
#[command(
    name = "scenario-cli",
    version,
    about = "Authoring helper for interactive scenario courses"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create `index.json` plus intro/finish files interactively.
    Init,
    /// Scaffold the conventional `assets/host01` layout.
    Assets,
    /// Check a course's manifest and referenced files.
    Validate {
        /// Course directory to validate.
        #[arg(long, default_value = ".")]
        path: PathBuf,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let cwd = env::current_dir().context("resolve current directory")?;

    match cli.command {
        Some(Command::Init) => {
            init_course(&cwd, &TerminalPrompter)?;
            println!("Project initialized. Add steps by running `scenario-cli`.");
            Ok(exit_codes::OK)
        }
        Some(Command::Assets) => {
            for path in scaffold_assets(&cwd)? {
                println!("created {path}");
            }
            Ok(exit_codes::OK)
        }
        Some(Command::Validate { path }) => {
            let passed = validate::validate_all(&path)?;
            Ok(if passed {
                exit_codes::OK
            } else {
                exit_codes::INVALID
            })
        }
        None => {
            add_step::run(&cwd, &TerminalPrompter, &TreeCommand::default())?;
            Ok(exit_codes::OK)
        }
    }
}
