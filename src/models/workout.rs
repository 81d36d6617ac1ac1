use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Informational session category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
  Endurance,
  Interval,
  Recovery,
  Threshold,
  Tempo,
  Race,
}

impl WorkoutType {
  pub const ALL: [WorkoutType; 6] = [
    Self::Recovery,
    Self::Endurance,
    Self::Tempo,
    Self::Threshold,
    Self::Interval,
    Self::Race,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Endurance => "endurance",
      Self::Interval => "interval",
      Self::Recovery => "recovery",
      Self::Threshold => "threshold",
      Self::Tempo => "tempo",
      Self::Race => "race",
    }
  }
}

impl std::fmt::Display for WorkoutType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for WorkoutType {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|t| t.as_str() == s)
      .ok_or_else(|| format!("Unknown workout type: {}", s))
  }
}

/// A validated training session. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
  pub id: String,
  pub date: NaiveDate,
  pub duration_minutes: u32,
  pub distance_km: f64,
  pub avg_power_watts: u32,
  /// Training Stress Score, the only field the metrics engine reads
  pub tss: f64,
  pub workout_type: WorkoutType,
}

/// A workout exactly as persisted (JSON object or `workouts` table row),
/// before any field validation
#[derive(Debug, Clone, Deserialize, sqlx::FromRow)]
pub struct RawWorkout {
  pub id: String,
  pub date: String,
  pub duration_minutes: i64,
  pub distance_km: f64,
  pub avg_power_watts: i64,
  pub tss: f64,
  pub workout_type: String,
}

impl RawWorkout {
  /// Check every field and build the immutable record
  pub fn validate(self) -> Result<WorkoutRecord, String> {
    if self.id.trim().is_empty() {
      return Err("id must not be empty".to_string());
    }

    let date = parse_record_date(&self.date)
      .ok_or_else(|| format!("Invalid date format: {}", self.date))?;

    let duration_minutes = u32::try_from(self.duration_minutes)
      .ok()
      .filter(|d| *d > 0)
      .ok_or_else(|| format!("duration_minutes must be positive, got {}", self.duration_minutes))?;

    if !self.distance_km.is_finite() || self.distance_km < 0.0 {
      return Err(format!("distance_km must be non-negative, got {}", self.distance_km));
    }

    let avg_power_watts = u32::try_from(self.avg_power_watts)
      .map_err(|_| format!("avg_power_watts must be non-negative, got {}", self.avg_power_watts))?;

    if !self.tss.is_finite() || self.tss < 0.0 {
      return Err(format!("tss must be non-negative, got {}", self.tss));
    }

    let workout_type = self.workout_type.parse::<WorkoutType>()?;

    Ok(WorkoutRecord {
      id: self.id,
      date,
      duration_minutes,
      distance_km: self.distance_km,
      avg_power_watts,
      tss: self.tss,
      workout_type,
    })
  }
}

/// Parse a persisted date. Plain `YYYY-MM-DD` is the normal form; ISO 8601
/// date-times are accepted too and truncated to their calendar date.
pub fn parse_record_date(value: &str) -> Option<NaiveDate> {
  let value = value.trim();

  if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
    return Some(date);
  }

  for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
      return Some(datetime.date());
    }
  }

  DateTime::parse_from_rfc3339(value)
    .ok()
    .map(|datetime| datetime.date_naive())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn raw(date: &str, tss: f64) -> RawWorkout {
    RawWorkout {
      id: "w-1".to_string(),
      date: date.to_string(),
      duration_minutes: 60,
      distance_km: 30.0,
      avg_power_watts: 200,
      tss,
      workout_type: "endurance".to_string(),
    }
  }

  #[test]
  fn test_valid_raw_workout() {
    let record = raw("2024-01-15", 75.0).validate().unwrap();
    assert_eq!(record.id, "w-1");
    assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    assert_eq!(record.duration_minutes, 60);
    assert_eq!(record.avg_power_watts, 200);
    assert_eq!(record.tss, 75.0);
    assert_eq!(record.workout_type, WorkoutType::Endurance);
  }

  #[test]
  fn test_datetime_is_truncated_to_date() {
    let record = raw("2024-01-15T10:30:00", 75.0).validate().unwrap();
    assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

    let record = raw("2024-01-15T23:59:59+02:00", 75.0).validate().unwrap();
    assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
  }

  #[test]
  fn test_invalid_date_rejected() {
    let err = raw("15/01/2024", 75.0).validate().unwrap_err();
    assert!(err.contains("Invalid date format"), "got: {}", err);
    assert!(raw("2024-02-30", 75.0).validate().is_err());
  }

  #[test]
  fn test_negative_tss_rejected() {
    let err = raw("2024-01-15", -1.0).validate().unwrap_err();
    assert!(err.contains("tss"), "got: {}", err);
  }

  #[test]
  fn test_zero_tss_allowed() {
    assert!(raw("2024-01-15", 0.0).validate().is_ok());
  }

  #[test]
  fn test_non_positive_duration_rejected() {
    let mut w = raw("2024-01-15", 50.0);
    w.duration_minutes = 0;
    assert!(w.validate().is_err());

    let mut w = raw("2024-01-15", 50.0);
    w.duration_minutes = -30;
    assert!(w.validate().is_err());
  }

  #[test]
  fn test_negative_distance_and_power_rejected() {
    let mut w = raw("2024-01-15", 50.0);
    w.distance_km = -0.5;
    assert!(w.validate().is_err());

    let mut w = raw("2024-01-15", 50.0);
    w.avg_power_watts = -10;
    assert!(w.validate().is_err());
  }

  #[test]
  fn test_unknown_workout_type_rejected() {
    let mut w = raw("2024-01-15", 50.0);
    w.workout_type = "yoga".to_string();
    let err = w.validate().unwrap_err();
    assert_eq!(err, "Unknown workout type: yoga");
  }

  #[test]
  fn test_workout_type_round_trips_through_str() {
    for t in WorkoutType::ALL {
      assert_eq!(t.to_string().parse::<WorkoutType>().unwrap(), t);
    }
  }

  #[test]
  fn test_record_serializes_with_plain_date() {
    let record = raw("2024-01-15", 75.0).validate().unwrap();
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["date"], "2024-01-15");
    assert_eq!(json["workout_type"], "endurance");
  }
}
