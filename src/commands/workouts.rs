//! Workout store tools

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{deserialize_date, deserialize_optional_date, ToolArgs};
use crate::error::{WorkoutError, WorkoutResult};
use crate::models::WorkoutRecord;
use crate::store::{SortOrder, WorkoutStore};

pub const DEFAULT_RECENT_LIMIT: usize = 10;
pub const MAX_RECENT_LIMIT: usize = 100;

/// A list of workouts plus its length
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutList {
  pub workouts: Vec<WorkoutRecord>,
  pub count: usize,
}

impl<'a> FromIterator<&'a WorkoutRecord> for WorkoutList {
  fn from_iter<I: IntoIterator<Item = &'a WorkoutRecord>>(iter: I) -> Self {
    let workouts: Vec<WorkoutRecord> = iter.into_iter().cloned().collect();
    Self {
      count: workouts.len(),
      workouts,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Arguments
/// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecentWorkoutsArgs {
  #[serde(default = "default_limit")]
  pub limit: usize,
}

fn default_limit() -> usize {
  DEFAULT_RECENT_LIMIT
}

impl ToolArgs for RecentWorkoutsArgs {
  fn validate(&self) -> WorkoutResult<()> {
    if !(1..=MAX_RECENT_LIMIT).contains(&self.limit) {
      return Err(WorkoutError::InvalidInput(format!(
        "limit must be between 1 and {}, got {}",
        MAX_RECENT_LIMIT, self.limit
      )));
    }
    Ok(())
  }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllWorkoutsArgs {
  #[serde(default)]
  pub order: SortOrder,
}

impl ToolArgs for AllWorkoutsArgs {}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkoutIdArgs {
  pub workout_id: String,
}

impl ToolArgs for WorkoutIdArgs {
  fn validate(&self) -> WorkoutResult<()> {
    if self.workout_id.trim().is_empty() {
      return Err(WorkoutError::InvalidInput("workout_id must not be empty".to_string()));
    }
    Ok(())
  }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DateRangeArgs {
  #[serde(deserialize_with = "deserialize_date")]
  pub end_date: NaiveDate,
  #[serde(default, deserialize_with = "deserialize_optional_date")]
  pub start_date: Option<NaiveDate>,
}

impl ToolArgs for DateRangeArgs {
  fn validate(&self) -> WorkoutResult<()> {
    match self.start_date {
      Some(start) if start > self.end_date => Err(WorkoutError::InvalidInput(format!(
        "start_date {} is after end_date {}",
        start, self.end_date
      ))),
      _ => Ok(()),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Operations
/// ---------------------------------------------------------------------------

pub fn get_recent_workouts(store: &WorkoutStore, args: RecentWorkoutsArgs) -> WorkoutResult<WorkoutList> {
  Ok(store.get_recent(args.limit).into_iter().collect())
}

pub fn get_all_workouts(store: &WorkoutStore, args: AllWorkoutsArgs) -> WorkoutResult<WorkoutList> {
  Ok(store.get_all(args.order).into_iter().collect())
}

pub fn get_workout(store: &WorkoutStore, args: WorkoutIdArgs) -> WorkoutResult<WorkoutRecord> {
  store.get_by_id(&args.workout_id).cloned()
}

pub fn get_workouts_in_range(store: &WorkoutStore, args: DateRangeArgs) -> WorkoutResult<WorkoutList> {
  Ok(store.get_range(args.end_date, args.start_date).iter().collect())
}

/// ---------------------------------------------------------------------------
/// Input Schemas
/// ---------------------------------------------------------------------------

pub fn recent_workouts_schema() -> Value {
  json!({
    "type": "object",
    "properties": {
      "limit": {
        "type": "integer",
        "minimum": 1,
        "maximum": MAX_RECENT_LIMIT,
        "default": DEFAULT_RECENT_LIMIT,
        "description": "Number of workouts to return"
      }
    },
    "additionalProperties": false
  })
}

pub fn all_workouts_schema() -> Value {
  json!({
    "type": "object",
    "properties": {
      "order": {
        "type": "string",
        "enum": ["desc", "asc", "descending", "ascending"],
        "default": "desc"
      }
    },
    "additionalProperties": false
  })
}

pub fn workout_id_schema() -> Value {
  json!({
    "type": "object",
    "properties": {
      "workout_id": { "type": "string", "description": "Workout identifier" }
    },
    "required": ["workout_id"],
    "additionalProperties": false
  })
}

pub fn range_schema() -> Value {
  json!({
    "type": "object",
    "properties": {
      "end_date": { "type": "string", "format": "date", "description": "Last day, YYYY-MM-DD" },
      "start_date": { "type": "string", "format": "date", "description": "First day, YYYY-MM-DD" }
    },
    "required": ["end_date"],
    "additionalProperties": false
  })
}
