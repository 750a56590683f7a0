//! `gradle-submitr` — extract resolved Gradle dependency trees and submit
//! one batch per module to an analysis service.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load service config ([`config::load_config`]).
//! 3. Resolve the root project name (directory-name fallback).
//! 4. Discover sub-modules and process every target ([`driver`]): invoke
//!    Gradle ([`gradle`]), parse its report ([`parser`]), submit ([`api`]).
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0` unless every target failed.

mod api;
mod cli;
mod config;
mod driver;
mod gradle;
mod models;
mod parser;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use api::ApiClient;
use cli::{Cli, ReportFormat};
use config::load_config;
use driver::RunOptions;
use gradle::GradleTool;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let path = cli.path.canonicalize().unwrap_or_else(|_| cli.path.clone());

    let config = load_config(&path, cli.config.as_deref())?;

    let base_url = cli.api_url.or(config.service.base_url).context(
        "no analysis service endpoint configured; pass --api-url or set service.base_url",
    )?;

    // Fall back to the directory name when no project name is given.
    let project = match cli.project {
        Some(project) => project,
        None => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .context("cannot derive a project name from the path; pass --project")?;
            if !cli.quiet {
                eprintln!(
                    "  {} no project name specified, using the directory name: {}",
                    "⚠".yellow(),
                    name
                );
            }
            name
        }
    };

    if !cli.quiet {
        eprintln!(
            "  {} tree parsing is approximate; prefer dependency locking where possible:",
            "⚠".yellow()
        );
        eprintln!("    https://docs.gradle.org/current/userguide/dependency_locking.html");
    }

    let build = GradleTool::new(&path);
    let api = ApiClient::new(base_url, config.service.token)?;

    let run_report = driver::run(
        &build,
        &api,
        &RunOptions {
            project: project.clone(),
            group: cli.group,
            configuration: cli.configuration,
            quiet: cli.quiet,
        },
    )
    .await?;

    match cli.report {
        ReportFormat::Terminal => {
            report::terminal::render(&run_report, &project, cli.verbose, cli.quiet)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&run_report.outcomes)?);
        }
    }

    Ok(())
}
