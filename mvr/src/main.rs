use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail};
use log::info;
use std::io::Write;
use std::path::PathBuf;

use mavenrunner::cli::{Cli, Command};
use mavenrunner::config::Config;
use mavenrunner::lifecycle::{all_phases, lifecycle_phases};
use mavenrunner::{Maven, locate_maven};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Run {
            targets,
            parameters,
            options,
        } => {
            let mut maven = handle_from(&cli.maven_path, &cli.project_dir, &config)?;

            if !options.is_empty() {
                maven.options(options);
            }
            for raw in &parameters {
                let Some((key, value)) = raw.split_once('=') else {
                    bail!("Invalid parameter '{}': expected KEY=VALUE", raw);
                };
                maven.set_parameter(key, value);
            }
            maven.targets(targets);

            let result = maven.result_blocking().context("Failed to invoke maven")?;
            info!("ran: {}", result.command_line().unwrap_or_default());

            print!("{}", result.output().unwrap_or_default());
            let exit_code = result.exit_code().unwrap_or(-1);
            if exit_code != 0 {
                std::io::stdout().flush().ok();
                eprintln!("{} maven exited with code {}", "✗".red(), exit_code);
                std::process::exit(exit_code);
            }
        }
        Command::Version => {
            let maven = handle_from(&cli.maven_path, &cli.project_dir, &config)?;
            let version = maven.version().context("Failed to detect maven version")?;

            println!("{}  {}", "maven".cyan(), version.maven);
            println!("{} {}", "family".cyan(), version.family);
            if let Some(java) = version.java {
                println!("{}   {}", "java".cyan(), java);
            }
            if let Some(java_path) = version.java_path {
                println!("{}   {}", "home".cyan(), java_path);
            }
        }
        Command::Which => {
            let path = resolve_executable(&cli.maven_path, &config)?;
            println!("{}", path.display());
        }
        Command::Phases { lifecycle } => match lifecycle {
            Some(name) => match lifecycle_phases(&name) {
                Some(phases) => {
                    for phase in phases {
                        println!("{}", phase);
                    }
                }
                None => bail!("Unknown lifecycle '{}': expected default, clean or site", name),
            },
            None => {
                for phase in all_phases() {
                    println!("{}", phase);
                }
            }
        },
    }

    Ok(())
}

/// Build a handle from CLI flags and config, applying configured defaults
fn handle_from(maven_path: &Option<PathBuf>, project_dir: &Option<PathBuf>, config: &Config) -> Result<Maven> {
    let executable = resolve_executable(maven_path, config)?;
    let mut maven = Maven::new(executable);

    if let Some(dir) = project_dir.clone().or_else(|| config.project_dir.clone()) {
        maven.set_working_dir(dir);
    }
    if !config.options.is_empty() {
        maven.options(config.options.iter().cloned());
    }
    for (key, value) in &config.parameters {
        maven.set_parameter(key, value);
    }

    Ok(maven)
}

fn resolve_executable(maven_path: &Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    if let Some(path) = maven_path.clone().or_else(|| config.maven_path.clone()) {
        return Ok(path);
    }
    Ok(locate_maven().context("Failed to locate the maven executable")?)
}
