//! Startup state shared by every subcommand: configuration, dataset and the
//! reference clock.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use scs_conecta_engine::{EngineConfig, EngineError};
use scs_conecta_fixtures::{FixtureError, StaticRepository};
use thiserror::Error;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "SCS_CONECTA_CONFIG";

/// Accepted `--now` formats.
const NOW_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Failures while preparing the run.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Failed to read config {}: {source}", path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] EngineError),

    #[error(transparent)]
    Fixtures(#[from] FixtureError),

    #[error("Invalid --now '{0}', expected YYYY-MM-DDTHH:MM[:SS]")]
    Now(String),
}

/// Loads the engine configuration from `path`, then from the file named by
/// [`CONFIG_ENV`], falling back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig, ContextError> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

    let Some(path) = path else {
        log::debug!("No config file given, using defaults");
        return Ok(EngineConfig::default());
    };

    let contents = std::fs::read_to_string(&path).map_err(|source| ContextError::ConfigIo {
        path: path.clone(),
        source,
    })?;
    let config = EngineConfig::from_toml_str(&contents)?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// The bundled fixtures, or those in `dir` when given.
pub fn load_repository(dir: Option<&Path>) -> Result<StaticRepository, ContextError> {
    Ok(match dir {
        Some(dir) => StaticRepository::from_dir(dir)?,
        None => StaticRepository::bundled(),
    })
}

/// Parses `--now`, defaulting to the local wall clock.
pub fn resolve_now(raw: Option<&str>) -> Result<NaiveDateTime, ContextError> {
    let Some(raw) = raw.map(str::trim) else {
        return Ok(chrono::Local::now().naive_local());
    };

    NOW_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .ok_or_else(|| ContextError::Now(raw.to_string()))
}
