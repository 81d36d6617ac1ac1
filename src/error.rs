use serde::Serialize;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

/// Every failure a tool call can surface to the host.
///
/// All variants are terminal for the call that produced them; none of them
/// are worth retrying and none should take the process down.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkoutError {
  /// Backing dataset missing, unreadable or structurally invalid
  #[error("Failed to load workout data: {0}")]
  DataLoad(String),

  #[error("Workout not found: {0}")]
  NotFound(String),

  /// A metric was requested for a date with no qualifying history
  #[error("Insufficient data: {0}")]
  InsufficientData(String),

  #[error("Invalid input: {0}")]
  InvalidInput(String),
}

impl WorkoutError {
  /// Stable machine-readable code for the host layer
  pub fn kind(&self) -> &'static str {
    match self {
      Self::DataLoad(_) => "data_load_error",
      Self::NotFound(_) => "not_found",
      Self::InsufficientData(_) => "insufficient_data",
      Self::InvalidInput(_) => "invalid_input",
    }
  }
}

impl Serialize for WorkoutError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

pub type WorkoutResult<T> = Result<T, WorkoutError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_kinds_are_stable() {
    assert_eq!(WorkoutError::DataLoad("x".into()).kind(), "data_load_error");
    assert_eq!(WorkoutError::NotFound("x".into()).kind(), "not_found");
    assert_eq!(WorkoutError::InsufficientData("x".into()).kind(), "insufficient_data");
    assert_eq!(WorkoutError::InvalidInput("x".into()).kind(), "invalid_input");
  }

  #[test]
  fn test_error_serializes_as_message() {
    let err = WorkoutError::NotFound("abc".into());
    let json = serde_json::to_string(&err).unwrap();
    assert_eq!(json, "\"Workout not found: abc\"");
  }
}
