//! Load-once access to the workout dataset
//!
//! `WorkoutLoader` owns the data source and memoizes the validated store.
//! Concurrent first accesses share a single load; a failed load leaves the
//! cache empty so a later call can try again.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::config::DataSource;
use crate::db;
use crate::error::{WorkoutError, WorkoutResult};
use crate::models::RawWorkout;
use crate::store::WorkoutStore;

/// Read and validate a JSON workout file
pub fn load_workouts_from_json(path: &Path) -> WorkoutResult<WorkoutStore> {
  let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
    std::io::ErrorKind::NotFound => {
      WorkoutError::DataLoad(format!("Workout data file not found: {}", path.display()))
    }
    _ => WorkoutError::DataLoad(format!("Error reading workout data file {}: {}", path.display(), e)),
  })?;

  parse_workouts_json(&contents)
}

/// Parse a top-level JSON array of workouts
pub fn parse_workouts_json(contents: &str) -> WorkoutResult<WorkoutStore> {
  let value: serde_json::Value = serde_json::from_str(contents)
    .map_err(|e| WorkoutError::DataLoad(format!("Invalid JSON in workout data file: {}", e)))?;

  let items = match value {
    serde_json::Value::Array(items) => items,
    _ => return Err(WorkoutError::DataLoad("Workout data must be a list".to_string())),
  };

  let raw = items
    .into_iter()
    .enumerate()
    .map(|(idx, item)| {
      serde_json::from_value::<RawWorkout>(item)
        .map_err(|e| WorkoutError::DataLoad(format!("Invalid workout at index {}: {}", idx, e)))
    })
    .collect::<WorkoutResult<Vec<_>>>()?;

  WorkoutStore::from_raw(raw)
}

/// Read and validate every row of a SQLite `workouts` table. The database is
/// only queried, never migrated.
pub async fn load_workouts_from_db(database_url: &str) -> WorkoutResult<WorkoutStore> {
  let pool = db::connect_db(database_url).await?;
  let rows = db::fetch_raw_workouts(&pool).await;
  pool.close().await;

  WorkoutStore::from_raw(rows?)
}

pub struct WorkoutLoader {
  /// `None` for a loader built around an in-memory store
  source: Option<DataSource>,
  cache: OnceCell<Arc<WorkoutStore>>,
}

impl WorkoutLoader {
  pub fn new(source: DataSource) -> Self {
    Self {
      source: Some(source),
      cache: OnceCell::new(),
    }
  }

  /// Loader whose store is already in memory, without a backing source.
  /// Once its cache is cleared every `load` fails with `DataLoad`.
  pub fn from_store(store: WorkoutStore) -> Self {
    Self {
      source: None,
      cache: OnceCell::new_with(Some(Arc::new(store))),
    }
  }

  pub fn source(&self) -> Option<&DataSource> {
    self.source.as_ref()
  }

  pub fn is_loaded(&self) -> bool {
    self.cache.initialized()
  }

  /// Validated store, reading the source on first use only
  pub async fn load(&self) -> WorkoutResult<Arc<WorkoutStore>> {
    self
      .cache
      .get_or_try_init(|| async {
        let result = match &self.source {
          Some(source) => {
            info!("Loading workout data from {}", source);
            match source {
              DataSource::JsonFile(path) => load_workouts_from_json(path),
              DataSource::Sqlite(url) => load_workouts_from_db(url).await,
            }
          }
          None => Err(WorkoutError::DataLoad(
            "No data source to reload the workout store from".to_string(),
          )),
        };

        match result {
          Ok(store) => {
            info!("Successfully loaded {} workouts", store.len());
            Ok(Arc::new(store))
          }
          Err(e) => {
            warn!("{}", e);
            Err(e)
          }
        }
      })
      .await
      .cloned()
  }

  /// Forget the cached store so the next `load` re-reads the source
  pub fn clear_cache(&mut self) {
    self.cache.take();
  }
}
