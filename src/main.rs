//! ue-headless - Command-line helpers for headless Unreal Engine workflows

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use unreal_headless::commands::*;
use unreal_headless::config::Settings;
use unreal_headless::error::Result;
use unreal_headless::logging;
use unreal_headless::logview::LogQuery;
use unreal_headless::ui::CliUI;

#[derive(Parser)]
#[command(name = "ue-headless")]
#[command(about = "Parse Unreal build/test output and edit project config", long_about = None)]
struct Cli {
    /// Project directory or .uproject file (defaults to discovery from the
    /// working directory)
    #[arg(short = 'C', long, global = true, env = "UE_PROJECT")]
    project: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize errors and warnings from build output
    #[command(name = "build-report")]
    BuildReport {
        /// Build log to read ("-" or omitted for stdin)
        file: Option<String>,

        /// Exit code of the build; decides success when given
        #[arg(long, allow_negative_numbers = true)]
        exit_code: Option<i32>,
    },

    /// Report per-test outcomes from an automation log
    #[command(name = "test-results")]
    TestResults {
        /// Automation log to read ("-" or omitted for stdin)
        file: Option<String>,
    },

    /// List tests from `Automation List` output
    #[command(name = "list-tests")]
    ListTests {
        /// Log to read ("-" or omitted for stdin)
        file: Option<String>,

        /// Only show tests whose name contains this (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Read and write Config/*.ini files
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show part of an engine log (latest in Saved/Logs by default)
    Log {
        /// Log file to read
        file: Option<PathBuf>,

        /// Only show lines containing this (case-insensitive)
        #[arg(long)]
        filter: Option<String>,

        /// Skip this many matching lines
        #[arg(long, default_value = "0")]
        offset: usize,

        /// Maximum lines to show (default 200, capped at 500)
        #[arg(long)]
        max_lines: Option<usize>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the value of a key
    Get {
        file: String,
        section: String,
        key: String,
    },

    /// Set a key, creating the section or file as needed
    Set {
        file: String,
        section: String,
        key: String,
        value: String,
    },

    /// Remove the first occurrence of a key
    Delete {
        file: String,
        section: String,
        key: String,
    },

    /// Print all keys of a section
    List { file: String, section: String },

    /// Print all section names
    #[command(name = "list-sections")]
    ListSections { file: String },
}

impl From<ConfigCommands> for ConfigAction {
    fn from(cmd: ConfigCommands) -> Self {
        match cmd {
            ConfigCommands::Get { file, section, key } => ConfigAction::Get { file, section, key },
            ConfigCommands::Set {
                file,
                section,
                key,
                value,
            } => ConfigAction::Set {
                file,
                section,
                key,
                value,
            },
            ConfigCommands::Delete { file, section, key } => {
                ConfigAction::Delete { file, section, key }
            }
            ConfigCommands::List { file, section } => ConfigAction::List { file, section },
            ConfigCommands::ListSections { file } => ConfigAction::ListSections { file },
        }
    }
}

fn load_settings(project: Option<&PathBuf>) -> Result<Settings> {
    match project {
        Some(project) => Ok(Settings::for_project_with_env(project, |key| {
            std::env::var(key).ok()
        })),
        None => Settings::load(),
    }
}

fn run(cli: Cli) -> Result<i32> {
    let settings = load_settings(cli.project.as_ref())?;
    logging::init(&settings.log_level);
    tracing::debug!(project_root = ?settings.project_root, "settings loaded");

    let project = settings.project_root.clone();
    let json = cli.json;

    let cmd: Box<dyn Command> = match cli.command {
        Commands::BuildReport { file, exit_code } => Box::new(
            BuildReportCommand::new(Input::from_arg(file.as_deref()), exit_code).with_json(json),
        ),
        Commands::TestResults { file } => Box::new(
            TestResultsCommand::new(Input::from_arg(file.as_deref())).with_json(json),
        ),
        Commands::ListTests { file, filter } => Box::new(
            ListTestsCommand::new(Input::from_arg(file.as_deref()), filter).with_json(json),
        ),
        Commands::Config { action } => {
            Box::new(ConfigCommand::new(project, action.into()).with_json(json))
        }
        Commands::Log {
            file,
            filter,
            offset,
            max_lines,
        } => {
            let query = LogQuery {
                filter,
                offset,
                max_lines,
            };
            Box::new(LogCommand::new(file, project, query).with_json(json))
        }
    };

    tracing::debug!(command = cmd.name(), "running command");
    let mut ui = CliUI::new();
    cmd.execute(&mut ui)
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            let _ = writeln!(std::io::stderr(), "Error: {}", e);
            std::process::exit(1);
        }
    }
}
