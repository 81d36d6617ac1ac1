use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::error::{WorkoutError, WorkoutResult};
use crate::models::{RawWorkout, WorkoutRecord};

pub type DbPool = SqlitePool;

/// Open the connection pool and run migrations
pub async fn initialize_db(database_url: &str) -> WorkoutResult<DbPool> {
  info!("Initializing database at: {}", database_url);

  let pool = connect_db(database_url).await?;
  run_migrations(&pool).await?;

  Ok(pool)
}

/// Open the connection pool without touching the schema
pub async fn connect_db(database_url: &str) -> WorkoutResult<DbPool> {
  SqlitePoolOptions::new()
    .max_connections(5)
    .connect(database_url)
    .await
    .map_err(|e| WorkoutError::DataLoad(format!("Failed to open database: {}", e)))
}

pub async fn run_migrations(pool: &DbPool) -> WorkoutResult<()> {
  sqlx::migrate!("./migrations")
    .run(pool)
    .await
    .map_err(|e| WorkoutError::DataLoad(format!("Failed to run migrations: {}", e)))
}

/// Every stored workout in insertion order, unvalidated
pub async fn fetch_raw_workouts(pool: &DbPool) -> WorkoutResult<Vec<RawWorkout>> {
  let rows = sqlx::query_as::<_, RawWorkout>(
    r#"
    SELECT id, date, duration_minutes, distance_km, avg_power_watts, tss, workout_type
    FROM workouts
    ORDER BY rowid
    "#,
  )
  .fetch_all(pool)
  .await
  .map_err(|e| WorkoutError::DataLoad(format!("Failed to fetch workouts: {}", e)))?;

  debug!("Fetched {} workout rows", rows.len());
  Ok(rows)
}

pub async fn insert_workout(pool: &DbPool, workout: &WorkoutRecord) -> WorkoutResult<()> {
  sqlx::query(
    r#"
    INSERT INTO workouts (
      id, date, duration_minutes, distance_km, avg_power_watts, tss, workout_type
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    "#,
  )
  .bind(&workout.id)
  .bind(workout.date.to_string())
  .bind(i64::from(workout.duration_minutes))
  .bind(workout.distance_km)
  .bind(i64::from(workout.avg_power_watts))
  .bind(workout.tss)
  .bind(workout.workout_type.as_str())
  .execute(pool)
  .await
  .map_err(|e| WorkoutError::DataLoad(format!("Failed to insert workout {}: {}", workout.id, e)))?;

  Ok(())
}
