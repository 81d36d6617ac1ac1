use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Earliest and latest session date folded into a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
  pub start: NaiveDate,
  pub end: NaiveDate,
}

/// Which EWMA a `LoadResult` carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMetric {
  /// Chronic Training Load ("fitness")
  Ctl,
  /// Acute Training Load ("fatigue")
  Atl,
}

/// Form interpretation band of a TSB value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormLabel {
  Fresh,
  Neutral,
  Fatigued,
}

impl FormLabel {
  pub fn from_tsb(tsb: f64) -> Self {
    if tsb > 5.0 {
      Self::Fresh
    } else if tsb < -5.0 {
      Self::Fatigued
    } else {
      Self::Neutral
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Fresh => "fresh",
      Self::Neutral => "neutral",
      Self::Fatigued => "fatigued",
    }
  }
}

impl std::fmt::Display for FormLabel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Result of a single fitness or fatigue computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadResult {
  pub date: NaiveDate,
  pub metric: LoadMetric,
  /// Rounded to one decimal place
  pub value: f64,
  pub time_constant_days: f64,
  pub workouts_considered: usize,
  pub date_range: DateRange,
}

/// Full fitness / fatigue / form snapshot for a target date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
  pub date: NaiveDate,
  pub ctl: f64,
  pub atl: f64,
  pub tsb: f64,
  pub form_label: FormLabel,
  pub workouts_considered: usize,
  pub date_range: DateRange,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_form_label_bands() {
    assert_eq!(FormLabel::from_tsb(5.1), FormLabel::Fresh);
    assert_eq!(FormLabel::from_tsb(5.0), FormLabel::Neutral);
    assert_eq!(FormLabel::from_tsb(0.0), FormLabel::Neutral);
    assert_eq!(FormLabel::from_tsb(-5.0), FormLabel::Neutral);
    assert_eq!(FormLabel::from_tsb(-5.1), FormLabel::Fatigued);
  }

  #[test]
  fn test_metric_result_field_names() {
    let d = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
    let result = MetricResult {
      date: d,
      ctl: 52.3,
      atl: 58.9,
      tsb: -6.6,
      form_label: FormLabel::Fatigued,
      workouts_considered: 3,
      date_range: DateRange { start: d, end: d },
    };

    let json = serde_json::to_value(&result).unwrap();
    for field in ["date", "ctl", "atl", "tsb", "form_label", "workouts_considered", "date_range"] {
      assert!(json.get(field).is_some(), "missing field {}", field);
    }
    assert_eq!(json["form_label"], "fatigued");
    assert_eq!(json["date_range"]["start"], "2024-01-03");
  }
}
