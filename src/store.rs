//! In-memory workout store
//!
//! Holds a validated, read-only record set ordered by date with an id index.
//! Built in one piece from persisted rows: either every record validates or
//! the caller gets a `DataLoad` error and no store at all.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{WorkoutError, WorkoutResult};
use crate::models::{RawWorkout, WorkoutRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
  #[serde(alias = "asc")]
  Ascending,
  /// Most recent first
  #[default]
  #[serde(alias = "desc")]
  Descending,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutStore {
  /// Ascending by date; records sharing a date keep load order
  records: Vec<WorkoutRecord>,
  by_id: HashMap<String, usize>,
}

impl WorkoutStore {
  /// Build a store from already-validated records
  pub fn new(mut records: Vec<WorkoutRecord>) -> WorkoutResult<Self> {
    // stable, so same-day sessions stay in load order
    records.sort_by_key(|r| r.date);

    let mut by_id = HashMap::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
      if by_id.insert(record.id.clone(), idx).is_some() {
        return Err(WorkoutError::DataLoad(format!(
          "Duplicate workout id: {}",
          record.id
        )));
      }
    }

    Ok(Self { records, by_id })
  }

  /// Validate persisted rows and build the store, failing on the first bad row
  pub fn from_raw(raw: Vec<RawWorkout>) -> WorkoutResult<Self> {
    let records = raw
      .into_iter()
      .enumerate()
      .map(|(idx, workout)| {
        workout
          .validate()
          .map_err(|e| WorkoutError::DataLoad(format!("Invalid workout at index {}: {}", idx, e)))
      })
      .collect::<WorkoutResult<Vec<_>>>()?;

    Self::new(records)
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  /// All records, oldest first
  pub fn records(&self) -> &[WorkoutRecord] {
    &self.records
  }

  pub fn get_by_id(&self, id: &str) -> WorkoutResult<&WorkoutRecord> {
    self
      .by_id
      .get(id)
      .map(|&idx| &self.records[idx])
      .ok_or_else(|| WorkoutError::NotFound(format!("no workout with id '{}'", id)))
  }

  pub fn get_all(&self, order: SortOrder) -> Vec<&WorkoutRecord> {
    match order {
      SortOrder::Ascending => self.records.iter().collect(),
      SortOrder::Descending => self.newest_first(),
    }
  }

  /// The `n` most recent records, newest first. Returns fewer when the
  /// store holds fewer.
  pub fn get_recent(&self, n: usize) -> Vec<&WorkoutRecord> {
    let mut recent = self.newest_first();
    recent.truncate(n);
    recent
  }

  /// Records with `start_date <= date <= end_date`, oldest first. No lower
  /// bound when `start_date` is `None`.
  pub fn get_range(&self, end_date: NaiveDate, start_date: Option<NaiveDate>) -> &[WorkoutRecord] {
    let lo = match start_date {
      Some(start) => self.records.partition_point(|r| r.date < start),
      None => 0,
    };
    let hi = self.records.partition_point(|r| r.date <= end_date);

    if lo >= hi {
      &[]
    } else {
      &self.records[lo..hi]
    }
  }

  fn newest_first(&self) -> Vec<&WorkoutRecord> {
    let mut sorted: Vec<&WorkoutRecord> = self.records.iter().collect();
    // stable sort over the ascending list keeps same-day load order
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
  }
}
