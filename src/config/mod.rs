use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path of the SQLite replica file
    pub replica: String,
    /// Database the rows are copied from
    pub source: SourceConfig,
}

/// Where `migrate` reads from. The production source is the catw MySQL
/// server; a SQLite source allows copying between local replicas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum SourceConfig {
    Mysql {
        #[serde(default = "default_host")]
        host: String,
        #[serde(default = "default_port")]
        port: u16,
        database: String,
        user: String,
        #[serde(default)]
        password: String,
        #[serde(default = "default_charset")]
        charset: String,
    },
    Sqlite {
        path: String,
    },
}

fn default_host() -> String {
    "localhost".to_string()
}
fn default_port() -> u16 {
    3306
}
fn default_charset() -> String {
    "utf8".to_string()
}

impl SourceConfig {
    /// One-line connection summary, without the password.
    pub fn describe(&self) -> String {
        match self {
            SourceConfig::Mysql {
                host,
                port,
                database,
                user,
                ..
            } => format!("mysql {user}@{host}:{port}/{database}"),
            SourceConfig::Sqlite { path } => format!("sqlite {path}"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            replica: Self::replica_file().to_string_lossy().to_string(),
            source: SourceConfig::Mysql {
                host: default_host(),
                port: default_port(),
                database: "catw".to_string(),
                user: "catw".to_string(),
                password: String::new(),
                charset: default_charset(),
            },
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("catwmigrate")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".catwmigrate")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("catwmigrate.conf")
    }

    /// Return the default path of the SQLite replica
    pub fn replica_file() -> PathBuf {
        Self::config_dir().join("catw.sqlite")
    }

    /// Load configuration from `explicit` when given, from the standard
    /// location otherwise. A missing standard file yields the defaults;
    /// a missing explicit file is an error.
    pub fn load(explicit: Option<&str>) -> AppResult<Self> {
        let path = match explicit {
            Some(p) => PathBuf::from(p),
            None => Self::config_file(),
        };

        if !path.exists() {
            if explicit.is_some() {
                return Err(AppError::Config(format!(
                    "configuration file not found: {}",
                    path.display()
                )));
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    /// Create the config directory and write a starter config file.
    /// An existing file is left untouched. Returns the path and whether
    /// a new file was written.
    pub fn init_all(explicit: Option<&str>) -> AppResult<(PathBuf, bool)> {
        let path = match explicit {
            Some(p) => PathBuf::from(p),
            None => Self::config_file(),
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if path.exists() {
            return Ok((path, false));
        }

        let yaml = serde_yaml::to_string(&Self::default())
            .map_err(|e| AppError::Config(format!("cannot render defaults: {e}")))?;
        let mut file = fs::File::create(&path)?;
        file.write_all(yaml.as_bytes())?;

        Ok((path, true))
    }
}
