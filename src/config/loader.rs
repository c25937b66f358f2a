//! Configuration loading from disk.
//!
//! Without an explicit path, `proxy.toml` is read from each of
//! [`default_search_paths`] in order. Missing files are skipped and later
//! files override earlier ones key by key.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// File name looked up in every search location.
pub const CONFIG_FILE_NAME: &str = "proxy.toml";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Decode(#[source] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Executable directory, `~/conf`, then the working directory.
pub fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        paths.push(dir.join(CONFIG_FILE_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join("conf").join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    paths
}

/// Load and validate configuration from a single TOML file, which must exist.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let table = read_table(path)?;
    finish(table)
}

/// Merge every existing file in `paths` and validate the result.
pub fn load_layered(paths: &[PathBuf]) -> Result<ProxyConfig, ConfigError> {
    let mut merged = toml::Table::new();
    for path in paths {
        if !path.is_file() {
            continue;
        }
        tracing::debug!(path = %path.display(), "Loading configuration layer");
        merge_tables(&mut merged, read_table(path)?);
    }
    finish(merged)
}

fn read_table(path: &Path) -> Result<toml::Table, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    content
        .parse::<toml::Table>()
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn finish(table: toml::Table) -> Result<ProxyConfig, ConfigError> {
    let config: ProxyConfig = toml::Value::Table(table)
        .try_into()
        .map_err(ConfigError::Decode)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Deep merge: nested tables merge, any other value replaces.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(incoming) => match base.get_mut(&key) {
                Some(toml::Value::Table(existing)) => merge_tables(existing, incoming),
                _ => {
                    base.insert(key, toml::Value::Table(incoming));
                }
            },
            other => {
                base.insert(key, other);
            }
        }
    }
}
