//! CLI argument parsing for mvr

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mvr")]
#[command(author, version, about = "Build and invoke Apache Maven commands", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the maven executable (overrides config and PATH lookup)
    #[arg(long)]
    pub maven_path: Option<PathBuf>,

    /// Project directory maven should build
    #[arg(short, long)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build and execute a maven command
    Run {
        /// Goals or lifecycle phases to run
        #[arg(required = true)]
        targets: Vec<String>,

        /// Parameters rendered as -Dkey=value
        #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
        parameters: Vec<String>,

        /// Raw option tokens passed through to maven
        #[arg(short, long, value_name = "OPTION", allow_hyphen_values = true)]
        options: Vec<String>,
    },

    /// Probe the maven executable and report its version
    Version,

    /// Print the located maven executable path
    Which,

    /// List known lifecycle phases
    Phases {
        /// Lifecycle to list (default, clean, site); all phases when omitted
        lifecycle: Option<String>,
    },
}
