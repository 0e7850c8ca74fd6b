use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::{Confirm, Input};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use mvn_sweep::cli::Cli;
use mvn_sweep::sweep::config::{self, FileConfig};
use mvn_sweep::sweep::log::{FileSink, Logger};
use mvn_sweep::sweep::report::{self, JsonReport};
use mvn_sweep::sweep::{Cleaner, ProgressMode, ScanConfig, Scanner};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let env = |key: &str| std::env::var(key).ok();

    let file_config = config::load_config(cli.config.as_deref())?;

    // JSON owns stdout; problems still reach stderr
    let mut logger = if cli.json {
        Logger::console_problems()
    } else {
        Logger::console()
    };
    if let Some(log_path) = config::resolve_log_file(cli.log_file.as_deref(), &file_config) {
        match FileSink::open(&log_path) {
            Ok(sink) => logger.add_sink(Arc::new(sink)),
            Err(e) => logger.warning(format!(
                "Failed to open log file {}: {}",
                log_path.display(),
                e
            )),
        }
    }

    let Some(path) = resolve_repository(&cli, &env, &file_config)? else {
        logger.error("No path specified. Use --path to specify the Maven repository path.");
        return Ok(ExitCode::FAILURE);
    };
    if let Err(e) = config::validate_repository(&path) {
        logger.error(e.summary());
        return Ok(ExitCode::FAILURE);
    }

    let workers = config::resolve_workers(cli.workers, &env, &file_config);
    let progress = if cli.json {
        ProgressMode::Hidden
    } else {
        ProgressMode::Terminal
    };

    logger.info(format!(
        "Starting scan of Maven repository path: {}",
        path.display()
    ));
    let scan_config = ScanConfig::new(&path, workers)?;
    let scanner = Scanner::new(logger.clone()).with_progress(progress);
    let outcome = scanner.scan(&scan_config);

    if let Some(e) = &outcome.error {
        logger.error(format!(
            "An error occurred during file system scan: {}",
            e.summary()
        ));
    }
    report::log_scan(&logger, &outcome);

    if outcome.is_empty() {
        logger.success(
            "Congratulations! No '.lastUpdated' related build directories found in your Maven repository.",
        );
        return finish(&cli, JsonReport { scan: &outcome, clean: None, dry_run: cli.dry_run });
    }

    if cli.dry_run {
        report::log_candidates(&logger, &outcome);
        logger.info(report::dry_run_summary(&outcome));
        return finish(&cli, JsonReport { scan: &outcome, clean: None, dry_run: true });
    }

    if !cli.force && !confirm_deletion(outcome.entries.len())? {
        logger.info("Operation cancelled.");
        return finish(&cli, JsonReport { scan: &outcome, clean: None, dry_run: false });
    }

    let cleaner = Cleaner::new(logger.clone()).with_progress(progress);
    let cleaned = cleaner.clean(&outcome.entries);
    logger.success(report::clean_summary(&cleaned));

    finish(&cli, JsonReport { scan: &outcome, clean: Some(cleaned), dry_run: false })
}

/// Command line, then environment, then an interactive prompt, then config file or default
fn resolve_repository<F>(cli: &Cli, env: F, file_config: &FileConfig) -> Result<Option<PathBuf>>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = config::explicit_repository(cli.path.as_deref(), env) {
        return Ok(Some(path));
    }

    if !cli.json && std::io::stdin().is_terminal() {
        let answer: String = Input::new()
            .with_prompt("Please enter your Maven repository root path (empty for default)")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read repository path")?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(Some(config::expand_home(std::path::Path::new(answer))));
        }
    }

    Ok(config::fallback_repository(file_config))
}

fn confirm_deletion(count: usize) -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        return Ok(false);
    }
    Confirm::new()
        .with_prompt(format!("Do you confirm deletion of these {} directories?", count))
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

fn finish(cli: &Cli, json: JsonReport) -> Result<ExitCode> {
    if cli.json {
        println!("{}", json.to_json()?);
    }
    Ok(ExitCode::SUCCESS)
}
