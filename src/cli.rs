//! Command-line surface.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "mvn-sweep",
    version,
    about = "Find and remove Maven repository directories left behind by interrupted downloads (*.lastUpdated)",
    after_help = "Environment:\n  MAVEN_REPO_PATH      default repository path\n  MVN_SWEEP_WORKERS    default number of sizing workers\n\nExamples:\n  mvn-sweep --path ~/.m2/repository\n  mvn-sweep -p ~/.m2/repository --force\n  mvn-sweep -p ~/.m2/repository --dry-run\n  mvn-sweep -p ~/.m2/repository --workers 4"
)]
pub struct Cli {
    /// Maven repository root (defaults to ~/.m2/repository)
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Delete without asking for confirmation
    #[arg(short, long)]
    pub force: bool,

    /// Only report what would be deleted
    #[arg(short, long)]
    pub dry_run: bool,

    /// Number of parallel size computations (0 = number of CPUs)
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    pub workers: usize,

    /// Also append log output to this file
    #[arg(short, long = "log", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Config file (defaults to <config dir>/mvn-sweep/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print a JSON report instead of progress bars and messages
    #[arg(long)]
    pub json: bool,
}
