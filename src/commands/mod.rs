//! Tool registration table
//!
//! Each entry binds a stable tool name to its description, JSON input schema
//! and a handler. Handlers parse and validate their arguments first and hand
//! back a prepared call, so malformed input is rejected before the dataset is
//! touched. Wire-level binding is left to the host.

pub mod metrics;
pub mod workouts;

use chrono::NaiveDate;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{WorkoutError, WorkoutResult};
use crate::store::WorkoutStore;

/// A validated tool call waiting for the store
pub type PreparedCall = Box<dyn FnOnce(&WorkoutStore) -> WorkoutResult<Value> + Send>;

pub type ToolHandler = fn(Value) -> WorkoutResult<PreparedCall>;

pub struct ToolDefinition {
  pub name: &'static str,
  pub description: &'static str,
  pub input_schema: fn() -> Value,
  pub handler: ToolHandler,
}

impl ToolDefinition {
  /// Name, description and schema in the shape tool hosts list them
  pub fn describe(&self) -> Value {
    json!({
      "name": self.name,
      "description": self.description,
      "inputSchema": (self.input_schema)(),
    })
  }
}

/// ---------------------------------------------------------------------------
/// Registered Tools
/// ---------------------------------------------------------------------------

pub static TOOLS: &[ToolDefinition] = &[
  ToolDefinition {
    name: "get_recent_workouts",
    description: "List the most recent cycling workouts, newest first",
    input_schema: workouts::recent_workouts_schema,
    handler: |args| prepare(args, workouts::get_recent_workouts),
  },
  ToolDefinition {
    name: "get_all_workouts",
    description: "List every loaded workout, newest first unless order is \"asc\"",
    input_schema: workouts::all_workouts_schema,
    handler: |args| prepare(args, workouts::get_all_workouts),
  },
  ToolDefinition {
    name: "get_workout",
    description: "Look up a single workout by its id",
    input_schema: workouts::workout_id_schema,
    handler: |args| prepare(args, workouts::get_workout),
  },
  ToolDefinition {
    name: "get_workouts_in_range",
    description: "List workouts between two dates (inclusive), oldest first",
    input_schema: workouts::range_schema,
    handler: |args| prepare(args, workouts::get_workouts_in_range),
  },
  ToolDefinition {
    name: "get_fitness",
    description: "Chronic Training Load (CTL, 42-day EWMA of TSS) as of a date",
    input_schema: metrics::date_schema,
    handler: |args| prepare(args, metrics::get_fitness),
  },
  ToolDefinition {
    name: "get_fatigue",
    description: "Acute Training Load (ATL, 7-day EWMA of TSS) as of a date",
    input_schema: metrics::date_schema,
    handler: |args| prepare(args, metrics::get_fatigue),
  },
  ToolDefinition {
    name: "get_form",
    description: "Training Stress Balance (TSB = CTL - ATL) with a fresh/neutral/fatigued label",
    input_schema: metrics::date_schema,
    handler: |args| prepare(args, metrics::get_form),
  },
];

pub fn find_tool(name: &str) -> Option<&'static ToolDefinition> {
  TOOLS.iter().find(|tool| tool.name == name)
}

/// ---------------------------------------------------------------------------
/// Argument Handling
/// ---------------------------------------------------------------------------

/// Tool arguments: deserialized from JSON, then checked for range errors
pub trait ToolArgs: DeserializeOwned + Send + 'static {
  fn validate(&self) -> WorkoutResult<()> {
    Ok(())
  }
}

/// Deserialize and validate tool arguments. `null` means "no arguments".
pub fn parse_args<A: ToolArgs>(args: Value) -> WorkoutResult<A> {
  let args = match args {
    Value::Null => Value::Object(Default::default()),
    other => other,
  };

  let parsed: A =
    serde_json::from_value(args).map_err(|e| WorkoutError::InvalidInput(e.to_string()))?;
  parsed.validate()?;
  Ok(parsed)
}

fn prepare<A, R>(args: Value, op: fn(&WorkoutStore, A) -> WorkoutResult<R>) -> WorkoutResult<PreparedCall>
where
  A: ToolArgs,
  R: Serialize + 'static,
{
  let args = parse_args::<A>(args)?;

  Ok(Box::new(move |store: &WorkoutStore| {
    let output = op(store, args)?;
    serde_json::to_value(output)
      .map_err(|e| WorkoutError::DataLoad(format!("Failed to serialize tool output: {}", e)))
  }))
}

/// Parse a strict `YYYY-MM-DD` date
pub fn parse_target_date(value: &str) -> WorkoutResult<NaiveDate> {
  check_date(value).map_err(WorkoutError::InvalidInput)
}

fn check_date(value: &str) -> Result<NaiveDate, String> {
  let well_formed = value.len() == 10
    && value.bytes().enumerate().all(|(i, b)| match i {
      4 | 7 => b == b'-',
      _ => b.is_ascii_digit(),
    });

  if !well_formed {
    return Err(format!("date must be in YYYY-MM-DD format, got '{}'", value));
  }

  NaiveDate::parse_from_str(value, "%Y-%m-%d")
    .map_err(|_| format!("'{}' is not a valid calendar date", value))
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
  D: Deserializer<'de>,
{
  let value = String::deserialize(deserializer)?;
  check_date(&value).map_err(serde::de::Error::custom)
}

pub(crate) fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
  D: Deserializer<'de>,
{
  Option::<String>::deserialize(deserializer)?
    .map(|value| check_date(&value).map_err(serde::de::Error::custom))
    .transpose()
}
