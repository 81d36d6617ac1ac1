//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock data factories
//! - Helper assertions

use std::io::Write;

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tempfile::NamedTempFile;

use crate::models::{WorkoutRecord, WorkoutType};
use crate::store::WorkoutStore;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  crate::db::run_migrations(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Parse a `YYYY-MM-DD` literal
pub fn date(value: &str) -> NaiveDate {
  NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("test date literal")
}

/// Create an hour-long endurance ride with the given TSS
pub fn mock_record(id: &str, day: &str, tss: f64) -> WorkoutRecord {
  WorkoutRecord {
    id: id.to_string(),
    date: date(day),
    duration_minutes: 60,
    distance_km: 30.0,
    avg_power_watts: 200,
    tss,
    workout_type: WorkoutType::Endurance,
  }
}

/// Build a store from (date, tss) pairs; ids are `w-<index>`
pub fn mock_store(sessions: &[(&str, f64)]) -> WorkoutStore {
  let records = sessions
    .iter()
    .enumerate()
    .map(|(i, (day, tss))| mock_record(&format!("w-{}", i), day, *tss))
    .collect();

  WorkoutStore::new(records).expect("mock records are valid")
}

/// Write JSON to a temp file that lives as long as the returned handle
pub fn write_json_fixture(contents: &str) -> NamedTempFile {
  let mut file = NamedTempFile::new().expect("Failed to create temp file");
  file
    .write_all(contents.as_bytes())
    .expect("Failed to write fixture");
  file
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> =
      sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = 'workouts'")
        .fetch_all(&pool)
        .await
        .expect("Failed to query tables");

    assert_eq!(tables.len(), 1);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_store_assigns_ids() {
    let store = mock_store(&[("2024-01-02", 10.0), ("2024-01-01", 20.0)]);
    assert_eq!(store.get_by_id("w-0").unwrap().date, date("2024-01-02"));
    assert_eq!(store.get_by_id("w-1").unwrap().tss, 20.0);
  }
}
