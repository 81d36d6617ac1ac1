//! Fitness metric tools

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{deserialize_date, ToolArgs};
use crate::error::WorkoutResult;
use crate::fitness::FitnessEngine;
use crate::models::{LoadResult, MetricResult};
use crate::store::WorkoutStore;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetDateArgs {
  #[serde(deserialize_with = "deserialize_date")]
  pub date: NaiveDate,
}

impl ToolArgs for TargetDateArgs {}

pub fn get_fitness(store: &WorkoutStore, args: TargetDateArgs) -> WorkoutResult<LoadResult> {
  FitnessEngine::new(store).compute_fitness(args.date)
}

pub fn get_fatigue(store: &WorkoutStore, args: TargetDateArgs) -> WorkoutResult<LoadResult> {
  FitnessEngine::new(store).compute_fatigue(args.date)
}

pub fn get_form(store: &WorkoutStore, args: TargetDateArgs) -> WorkoutResult<MetricResult> {
  FitnessEngine::new(store).compute_form(args.date)
}

pub fn date_schema() -> Value {
  json!({
    "type": "object",
    "properties": {
      "date": {
        "type": "string",
        "format": "date",
        "description": "Target date, YYYY-MM-DD. Later dates fold in all available history."
      }
    },
    "required": ["date"],
    "additionalProperties": false
  })
}
