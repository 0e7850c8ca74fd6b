// Tests for the error module

use mvn_sweep::sweep::SweepError;
use std::error::Error;
use std::io;
use std::path::PathBuf;

#[test]
fn test_path_not_found_display() {
    let error = SweepError::PathNotFound {
        path: PathBuf::from("/home/u/.m2/repository"),
    };
    let message = format!("{}", error);
    assert!(message.contains("Path not found"));
    assert!(message.contains("/home/u/.m2/repository"));
    assert!(message.contains("Suggestion"));
}

#[test]
fn test_summary_is_first_line_only() {
    let error = SweepError::InvalidParallelism { value: 0 };
    assert_eq!(error.summary(), "Invalid worker count: 0");
    assert!(error.to_string().contains("--workers"));
}

#[test]
fn test_from_io_error_not_found() {
    let err = io::Error::new(io::ErrorKind::NotFound, "gone");
    let error = SweepError::from_io_error(err, "scanning", Some(PathBuf::from("/repo")));
    assert!(matches!(error, SweepError::PathNotFound { .. }));
    assert!(error.is_not_found());
}

#[test]
fn test_from_io_error_permission_denied() {
    let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
    let error = SweepError::from_io_error(err, "deleting", Some(PathBuf::from("/repo/a")));
    match error {
        SweepError::PermissionDenied { path, operation } => {
            assert_eq!(path, PathBuf::from("/repo/a"));
            assert_eq!(operation, "deleting");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_from_io_error_without_path_keeps_source() {
    let err = io::Error::new(io::ErrorKind::NotFound, "gone");
    let error = SweepError::from_io_error(err, "reading", None);
    assert!(matches!(error, SweepError::Io { path: None, .. }));
    assert!(error.source().is_some());
    assert!(error.is_not_found());
}

#[test]
fn test_other_io_errors_keep_context() {
    let err = io::Error::new(io::ErrorKind::Other, "disk on fire");
    let error = SweepError::from_io_error(err, "deleting", Some(PathBuf::from("/repo/b")));
    let message = error.to_string();
    assert!(message.contains("deleting"));
    assert!(message.contains("/repo/b"));
    assert!(message.contains("disk on fire"));
    assert!(!error.is_not_found());
}

#[test]
fn test_config_error_display() {
    let error = SweepError::Config {
        path: PathBuf::from("config.toml"),
        reason: "unknown field `colour`".to_string(),
    };
    let message = error.to_string();
    assert!(message.contains("config.toml"));
    assert!(message.contains("colour"));
    assert!(message.contains("repository"));
}
