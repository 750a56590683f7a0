use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "gradle-submitr",
    about = "Extract resolved Gradle dependency trees and submit them for analysis",
    version
)]
pub struct Cli {
    /// Gradle project path
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Project name on the analysis service [default: the directory name]
    #[arg(long)]
    pub project: Option<String>,

    /// Group the project belongs to
    #[arg(long)]
    pub group: Option<String>,

    /// Analysis service endpoint (overrides the config file)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Config file [default: ./.gradle-submitr/config.toml, fallback ~/.config/gradle-submitr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Gradle configuration to read the dependency report from
    #[arg(long, default_value = "testRuntimeClasspath", value_name = "NAME")]
    pub configuration: String,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// List every submitted package per target
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the final summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
