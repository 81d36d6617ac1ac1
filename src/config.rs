use std::env;
use std::path::PathBuf;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const DATA_FILE_VAR: &str = "WORKOUT_DATA_FILE";
pub const DATABASE_URL_VAR: &str = "WORKOUT_DATABASE_URL";
pub const DEFAULT_DATA_FILE: &str = "data_store/workouts.json";

/// Where the workout dataset lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
  /// JSON file holding a top-level array of workouts
  JsonFile(PathBuf),
  /// SQLite database URL with a `workouts` table
  Sqlite(String),
}

impl std::fmt::Display for DataSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::JsonFile(path) => write!(f, "json file {}", path.display()),
      Self::Sqlite(url) => write!(f, "sqlite database {}", url),
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid configuration: {0} is set but empty")]
  Empty(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  pub source: DataSource,
}

impl Config {
  /// Read `.env` (if present) and then the process environment
  pub fn load() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();
    Self::from_env()
  }

  /// A database URL wins over a data file; with neither set the default
  /// JSON path is used.
  pub fn from_env() -> Result<Self, ConfigError> {
    if let Ok(url) = env::var(DATABASE_URL_VAR) {
      if url.trim().is_empty() {
        return Err(ConfigError::Empty(DATABASE_URL_VAR.into()));
      }
      return Ok(Self {
        source: DataSource::Sqlite(url),
      });
    }

    let path = match env::var(DATA_FILE_VAR) {
      Ok(path) if path.trim().is_empty() => return Err(ConfigError::Empty(DATA_FILE_VAR.into())),
      Ok(path) => PathBuf::from(path),
      Err(_) => PathBuf::from(DEFAULT_DATA_FILE),
    };

    Ok(Self {
      source: DataSource::JsonFile(path),
    })
  }
}
