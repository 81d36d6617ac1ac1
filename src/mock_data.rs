//! Synthetic workout history for development and demos
//!
//! Follows a 4-week periodised cycle (two build weeks, an intensity week and a
//! recovery week with three rest days). Output is deterministic for a seed.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::error::{WorkoutError, WorkoutResult};
use crate::fitness::round1;
use crate::models::{WorkoutRecord, WorkoutType};

pub const DEFAULT_WORKOUT_COUNT: usize = 50;
pub const DEFAULT_SPAN_DAYS: usize = 90;
pub const DEFAULT_SEED: u64 = 42;

const MIN_TSS: f64 = 20.0;
const MAX_TSS: f64 = 150.0;

/// What a given day of the plan calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPattern {
  Rest,
  RecoveryWeek,
  Build,
  Intensity,
}

impl DayPattern {
  fn workout_types(&self) -> &'static [WorkoutType] {
    match self {
      Self::Rest => &[],
      Self::RecoveryWeek => &[WorkoutType::Recovery, WorkoutType::Endurance],
      Self::Build => &[WorkoutType::Endurance, WorkoutType::Tempo, WorkoutType::Threshold],
      Self::Intensity => &[WorkoutType::Threshold, WorkoutType::Interval, WorkoutType::Race],
    }
  }

  /// (duration minutes, average watts) ranges
  fn ranges(&self) -> ((u32, u32), (u32, u32)) {
    match self {
      Self::Rest => ((0, 0), (0, 0)),
      Self::RecoveryWeek => ((30, 90), (100, 180)),
      Self::Build => ((60, 180), (150, 250)),
      Self::Intensity => ((45, 120), (200, 300)),
    }
  }
}

fn tss_multiplier(workout_type: WorkoutType) -> f64 {
  match workout_type {
    WorkoutType::Recovery => 0.4,
    WorkoutType::Endurance => 0.6,
    WorkoutType::Tempo => 0.8,
    WorkoutType::Threshold => 1.0,
    WorkoutType::Interval => 1.2,
    WorkoutType::Race => 1.3,
  }
}

/// Simplified TSS: `duration * power / 200`, scaled by session type, truncated
/// and clamped to 20..=150
pub fn calculate_tss(duration_minutes: u32, avg_power_watts: u32, workout_type: WorkoutType) -> f64 {
  let base = f64::from(duration_minutes) * f64::from(avg_power_watts) / 200.0;
  (base * tss_multiplier(workout_type)).trunc().clamp(MIN_TSS, MAX_TSS)
}

/// Day-by-day plan for `num_days`
pub fn training_plan(num_days: usize) -> Vec<DayPattern> {
  plan_days(num_days).collect()
}

fn plan_days(num_days: usize) -> impl Iterator<Item = DayPattern> {
  use DayPattern::*;

  const BASE_WEEK: [DayPattern; 7] = [Build, RecoveryWeek, Build, Intensity, Rest, Build, RecoveryWeek];
  const INTENSITY_WEEK: [DayPattern; 7] = [Intensity, RecoveryWeek, Build, Intensity, Rest, Build, Rest];
  const RECOVERY_WEEK: [DayPattern; 7] = [
    RecoveryWeek,
    RecoveryWeek,
    RecoveryWeek,
    RecoveryWeek,
    Rest,
    Rest,
    Rest,
  ];

  (0..num_days / 7 + 1)
    .flat_map(|week| match week % 4 {
      3 => RECOVERY_WEEK,
      2 => INTENSITY_WEEK,
      _ => BASE_WEEK,
    })
    .take(num_days)
}

/// One session for `date`, or `None` on a rest day
pub fn generate_workout<R: Rng>(rng: &mut R, date: NaiveDate, pattern: DayPattern) -> Option<WorkoutRecord> {
  let workout_type = *pattern.workout_types().choose(rng)?;
  let ((min_duration, max_duration), (min_power, max_power)) = pattern.ranges();

  let duration_minutes = rng.gen_range(min_duration..=max_duration);
  let avg_power_watts = rng.gen_range(min_power..=max_power);

  let avg_speed_kmh = 20.0 + (f64::from(avg_power_watts) - 150.0) / 10.0 + rng.gen_range(-3.0..3.0);
  let distance_km = round1((f64::from(duration_minutes) / 60.0 * avg_speed_kmh).max(0.0));

  let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid().to_string();

  Some(WorkoutRecord {
    id,
    date,
    duration_minutes,
    distance_km,
    avg_power_watts,
    tss: calculate_tss(duration_minutes, avg_power_watts, workout_type),
    workout_type,
  })
}

#[derive(Debug, Clone)]
pub struct MockDataOptions {
  pub count: usize,
  pub span_days: usize,
  /// Last day of the plan window
  pub end_date: NaiveDate,
  pub seed: u64,
}

impl MockDataOptions {
  pub fn ending_on(end_date: NaiveDate) -> Self {
    Self {
      count: DEFAULT_WORKOUT_COUNT,
      span_days: DEFAULT_SPAN_DAYS,
      end_date,
      seed: DEFAULT_SEED,
    }
  }
}

/// Generate `count` workouts following the plan that starts `span_days`
/// before `end_date`. If the plan runs out of training days first, extra
/// sessions are appended on the following days. Fails with `InvalidInput`
/// when the plan would leave the supported calendar range.
pub fn generate_mock_workouts(options: &MockDataOptions) -> WorkoutResult<Vec<WorkoutRecord>> {
  let mut rng = StdRng::seed_from_u64(options.seed);
  let mut current_date = options
    .end_date
    .checked_sub_days(Days::new(options.span_days as u64))
    .ok_or_else(|| {
      WorkoutError::InvalidInput(format!(
        "A {}-day plan ending {} starts before the earliest supported date",
        options.span_days, options.end_date
      ))
    })?;

  let mut workouts = Vec::with_capacity(options.count.min(options.span_days.max(1)));

  for pattern in plan_days(options.span_days) {
    if workouts.len() >= options.count {
      break;
    }
    if let Some(workout) = generate_workout(&mut rng, current_date, pattern) {
      workouts.push(workout);
    }
    current_date = next_day(current_date)?;
  }

  const TOP_UP: [DayPattern; 3] = [DayPattern::Build, DayPattern::RecoveryWeek, DayPattern::Intensity];
  while workouts.len() < options.count {
    let pattern = *TOP_UP.choose(&mut rng).unwrap_or(&DayPattern::Build);
    if let Some(workout) = generate_workout(&mut rng, current_date, pattern) {
      workouts.push(workout);
    }
    current_date = next_day(current_date)?;
  }

  Ok(workouts)
}

fn next_day(date: NaiveDate) -> WorkoutResult<NaiveDate> {
  date
    .succ_opt()
    .ok_or_else(|| WorkoutError::InvalidInput(format!("No calendar day after {}", date)))
}

/// Type distribution and load summary of a generated set
#[derive(Debug, Clone, Serialize)]
pub struct MockDataSummary {
  pub count: usize,
  pub type_counts: BTreeMap<&'static str, usize>,
  pub average_tss: f64,
  pub first_date: Option<NaiveDate>,
  pub last_date: Option<NaiveDate>,
}

impl MockDataSummary {
  pub fn compute(workouts: &[WorkoutRecord]) -> Self {
    let mut type_counts = BTreeMap::new();
    for workout in workouts {
      *type_counts.entry(workout.workout_type.as_str()).or_insert(0) += 1;
    }

    let total_tss: f64 = workouts.iter().map(|w| w.tss).sum();
    let average_tss = if workouts.is_empty() {
      0.0
    } else {
      round1(total_tss / workouts.len() as f64)
    };

    Self {
      count: workouts.len(),
      type_counts,
      average_tss,
      first_date: workouts.first().map(|w| w.date),
      last_date: workouts.last().map(|w| w.date),
    }
  }
}
