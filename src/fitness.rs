//! Fitness metrics engine
//!
//! CTL (fitness), ATL (fatigue) and TSB (form) as of a target date, computed
//! from the store's session history with an exponentially weighted moving
//! average:
//!
//! - `alpha = 1 - exp(-1 / tau)`
//! - seeded with the TSS of the earliest qualifying session
//! - `avg += alpha * (tss - avg)` for each later session, oldest first
//!
//! The average steps once per recorded session. Rest days are not folded in
//! as zero-TSS observations, so gaps in the calendar do not add decay.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{WorkoutError, WorkoutResult};
use crate::models::{DateRange, FormLabel, LoadMetric, LoadResult, MetricResult, WorkoutRecord};
use crate::store::WorkoutStore;

/// CTL time constant in days
pub const CTL_TIME_CONSTANT_DAYS: f64 = 42.0;

/// ATL time constant in days
pub const ATL_TIME_CONSTANT_DAYS: f64 = 7.0;

pub fn smoothing_factor(time_constant_days: f64) -> f64 {
  1.0 - (-1.0 / time_constant_days).exp()
}

/// EWMA over TSS values in chronological order. `None` when there is
/// nothing to seed from.
pub fn ewma(tss_values: &[f64], time_constant_days: f64) -> Option<f64> {
  let (&seed, rest) = tss_values.split_first()?;
  let alpha = smoothing_factor(time_constant_days);

  Some(rest.iter().fold(seed, |avg, &tss| avg + alpha * (tss - avg)))
}

/// Round to one decimal place for output
pub fn round1(value: f64) -> f64 {
  (value * 10.0).round() / 10.0
}

impl LoadMetric {
  pub fn time_constant_days(&self) -> f64 {
    match self {
      Self::Ctl => CTL_TIME_CONSTANT_DAYS,
      Self::Atl => ATL_TIME_CONSTANT_DAYS,
    }
  }
}

/// Sessions on or before a target date, oldest first
struct History<'a> {
  records: &'a [WorkoutRecord],
  tss: Vec<f64>,
  date_range: DateRange,
}

impl History<'_> {
  fn fold(&self, metric: LoadMetric) -> f64 {
    // non-empty by construction
    ewma(&self.tss, metric.time_constant_days()).unwrap_or_default()
  }
}

pub struct FitnessEngine<'a> {
  store: &'a WorkoutStore,
}

impl<'a> FitnessEngine<'a> {
  pub fn new(store: &'a WorkoutStore) -> Self {
    Self { store }
  }

  /// CTL (42-day EWMA) as of `target_date`
  pub fn compute_fitness(&self, target_date: NaiveDate) -> WorkoutResult<LoadResult> {
    self.compute_load(LoadMetric::Ctl, target_date)
  }

  /// ATL (7-day EWMA) as of `target_date`
  pub fn compute_fatigue(&self, target_date: NaiveDate) -> WorkoutResult<LoadResult> {
    self.compute_load(LoadMetric::Atl, target_date)
  }

  /// TSB = CTL - ATL, both folded independently over the same history
  pub fn compute_form(&self, target_date: NaiveDate) -> WorkoutResult<MetricResult> {
    let history = self.history(target_date)?;

    let ctl = history.fold(LoadMetric::Ctl);
    let atl = history.fold(LoadMetric::Atl);
    let tsb = round1(ctl - atl);

    debug!(
      "Form on {}: ctl={:.3} atl={:.3} tsb={} over {} workouts",
      target_date,
      ctl,
      atl,
      tsb,
      history.records.len()
    );

    Ok(MetricResult {
      date: target_date,
      ctl: round1(ctl),
      atl: round1(atl),
      tsb,
      form_label: FormLabel::from_tsb(tsb),
      workouts_considered: history.records.len(),
      date_range: history.date_range,
    })
  }

  fn compute_load(&self, metric: LoadMetric, target_date: NaiveDate) -> WorkoutResult<LoadResult> {
    let history = self.history(target_date)?;
    let value = history.fold(metric);

    debug!(
      "{:?} on {}: {:.3} over {} workouts",
      metric,
      target_date,
      value,
      history.records.len()
    );

    Ok(LoadResult {
      date: target_date,
      metric,
      value: round1(value),
      time_constant_days: metric.time_constant_days(),
      workouts_considered: history.records.len(),
      date_range: history.date_range,
    })
  }

  fn history(&self, target_date: NaiveDate) -> WorkoutResult<History<'a>> {
    let records = self.store.get_range(target_date, None);

    let (first, last) = match (records.first(), records.last()) {
      (Some(first), Some(last)) => (first, last),
      _ => {
        return Err(WorkoutError::InsufficientData(format!(
          "no workouts on or before {}; at least one session is needed to compute training load",
          target_date
        )))
      }
    };

    Ok(History {
      records,
      tss: records.iter().map(|r| r.tss).collect(),
      date_range: DateRange {
        start: first.date,
        end: last.date,
      },
    })
  }
}
