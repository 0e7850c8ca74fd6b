// Tests for command-line parsing

use clap::Parser;
use mvn_sweep::cli::Cli;
use std::path::PathBuf;

#[test]
fn test_defaults() {
    let cli = Cli::try_parse_from(["mvn-sweep"]).unwrap();
    assert_eq!(cli.path, None);
    assert!(!cli.force);
    assert!(!cli.dry_run);
    assert_eq!(cli.workers, 0);
    assert_eq!(cli.log_file, None);
    assert!(!cli.json);
}

#[test]
fn test_short_flags() {
    let cli = Cli::try_parse_from([
        "mvn-sweep", "-p", "/repo", "-f", "-d", "-w", "4", "-l", "out.log", "-c", "conf.toml",
    ])
    .unwrap();
    assert_eq!(cli.path, Some(PathBuf::from("/repo")));
    assert!(cli.force);
    assert!(cli.dry_run);
    assert_eq!(cli.workers, 4);
    assert_eq!(cli.log_file, Some(PathBuf::from("out.log")));
    assert_eq!(cli.config, Some(PathBuf::from("conf.toml")));
}

#[test]
fn test_long_flags() {
    let cli = Cli::try_parse_from([
        "mvn-sweep", "--path", "/repo", "--force", "--dry-run", "--workers", "2", "--log",
        "out.log", "--json",
    ])
    .unwrap();
    assert_eq!(cli.path, Some(PathBuf::from("/repo")));
    assert!(cli.force && cli.dry_run && cli.json);
    assert_eq!(cli.workers, 2);
}

#[test]
fn test_rejects_negative_workers() {
    assert!(Cli::try_parse_from(["mvn-sweep", "--workers", "-1"]).is_err());
}
