use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "leadbook";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_PORT: u16 = 3000;
pub const PORT_ENV: &str = "PORT";
pub const DATABASE_ENV: &str = "LEADBOOK_DATABASE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Store location; `None` selects the default under the data directory.
    pub database: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid port value: {0}")]
    InvalidPort(String),
    #[error("invalid database path: {0:?}")]
    InvalidDatabase(String),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    port: Option<u16>,
    database: Option<String>,
}

/// Environment values that override the file, read once by the caller.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub port: Option<String>,
    pub database: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            port: env::var(PORT_ENV).ok(),
            database: env::var(DATABASE_ENV).ok(),
        }
    }
}

/// Loads the config file (optional unless `config_path` is given) and
/// applies process environment overrides on top.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    load_with_env(config_path, &EnvOverrides::from_env())
}

pub fn load_with_env(
    config_path: Option<PathBuf>,
    overrides: &EnvOverrides,
) -> Result<AppConfig> {
    let required = config_path.is_some();
    let file = match resolve_config_path(config_path) {
        Ok(path) => load_at_path(&path, required)?,
        Err(ConfigError::MissingHomeDir) if !required => None,
        Err(ConfigError::InvalidConfigPath(_)) if !required => None,
        Err(err) => return Err(err),
    };
    let config = merge_config(file.unwrap_or_default())?;
    apply_overrides(config, overrides)
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(parsed))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(port) = parsed.port {
        config.port = validate_port(port)?;
    }

    if let Some(database) = parsed.database {
        config.database = Some(validate_database(&database)?);
    }

    Ok(config)
}

fn apply_overrides(mut config: AppConfig, overrides: &EnvOverrides) -> Result<AppConfig> {
    if let Some(raw) = overrides.port.as_deref() {
        let port = raw
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(raw.to_string()))?;
        config.port = validate_port(port)?;
    }

    if let Some(raw) = overrides.database.as_deref() {
        config.database = Some(validate_database(raw)?);
    }

    Ok(config)
}

fn validate_port(port: u16) -> Result<u16> {
    if port == 0 {
        return Err(ConfigError::InvalidPort(port.to_string()));
    }
    Ok(port)
}

fn validate_database(raw: &str) -> Result<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidDatabase(raw.to_string()));
    }
    Ok(PathBuf::from(trimmed))
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
