//! Settings resolution.
//!
//! Every setting is taken from the first source that provides it: command
//! line, environment, config file, built-in default. Environment lookups go
//! through a closure so callers (and tests) decide what the environment is.

use super::error::SweepError;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable holding the repository path.
pub const REPO_ENV: &str = "MAVEN_REPO_PATH";
/// Environment variable holding the worker count.
pub const WORKERS_ENV: &str = "MVN_SWEEP_WORKERS";

/// Contents of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub repository: Option<PathBuf>,
    pub workers: Option<usize>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    /// Parse TOML text; `origin` is only used for error messages.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, SweepError> {
        let mut config: FileConfig = toml::from_str(text).map_err(|e| SweepError::Config {
            path: origin.to_path_buf(),
            reason: e.message().to_string(),
        })?;
        config.repository = config.repository.map(|p| expand_home(&p));
        config.log_file = config.log_file.map(|p| expand_home(&p));
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, SweepError> {
        let text = fs::read_to_string(path).map_err(|e| {
            SweepError::from_io_error(e, "reading config file", Some(path.to_path_buf()))
        })?;
        Self::parse(&text, path)
    }
}

/// `<config dir>/mvn-sweep/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mvn-sweep").join("config.toml"))
}

/// Load the config file. An explicit path must exist; the default one is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<FileConfig, SweepError> {
    if let Some(path) = explicit {
        return FileConfig::load(path);
    }
    match default_config_path() {
        Some(path) => match FileConfig::load(&path) {
            Ok(config) => Ok(config),
            Err(e) if e.is_not_found() => Ok(FileConfig::default()),
            Err(e) => Err(e),
        },
        None => Ok(FileConfig::default()),
    }
}

/// Replace a leading `~` with the home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Repository path given explicitly, on the command line or in the environment.
/// `None` means the user may still be asked for one.
pub fn explicit_repository<F>(cli: Option<&Path>, env: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = cli {
        return Some(path.to_path_buf());
    }
    env(REPO_ENV)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(|value| expand_home(Path::new(&value)))
}

/// Repository path used when nothing was given explicitly.
pub fn fallback_repository(file: &FileConfig) -> Option<PathBuf> {
    file.repository
        .clone()
        .or_else(|| dirs::home_dir().map(|home| home.join(".m2").join("repository")))
}

/// Worker count. Zero or unparsable values mean "not set" at every layer.
pub fn resolve_workers<F>(cli: usize, env: F, file: &FileConfig) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    if cli > 0 {
        return cli;
    }
    if let Some(workers) = env(WORKERS_ENV)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|&workers| workers > 0)
    {
        return workers;
    }
    match file.workers {
        Some(workers) if workers > 0 => workers,
        _ => num_cpus::get(),
    }
}

pub fn resolve_log_file(cli: Option<&Path>, file: &FileConfig) -> Option<PathBuf> {
    cli.map(Path::to_path_buf).or_else(|| file.log_file.clone())
}

/// Fails with `PathNotFound`/`NotADirectory` unless `path` is an existing directory.
pub fn validate_repository(path: &Path) -> Result<(), SweepError> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(SweepError::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(SweepError::PathNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(SweepError::from_io_error(
            e,
            "checking repository",
            Some(path.to_path_buf()),
        )),
    }
}
