use crate::all::*;

// Errors raised by the tracking engine. Each one is distinct so that the
// caller can recover from it selectively instead of aborting.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
  #[error("Frame number must be a non-negative whole number, got {0}.")]
  InvalidFrame(f64),

  #[error("Pixel coordinates must be finite, got ({0}, {1}).")]
  InvalidPixel(f64, f64),

  #[error("Unknown measurement `{0}`.")]
  InvalidMeasurement(String),

  #[error("An object named `{0}` already exists.")]
  DuplicateName(String),

  #[error("No object is selected for tracking.")]
  NoCurrentObject,

  #[error("No object named `{0}`.")]
  UnknownObject(String),

  #[error("Unknown export format `{0}`.")]
  UnknownFormat(String),

  #[error("Invalid calibration: {0}")]
  InvalidCalibration(String),

  #[error("Unknown playback unit `{0}`.")]
  UnknownUnit(String),

  #[error("Skip amount must be positive, got {0}.")]
  NonPositiveIncrement(f64),

  #[error("Skip amount must be a whole number, got {0}.")]
  NonIntegerIncrement(f64),

  #[error("Delimiter {0:?} cannot separate exported values.")]
  InvalidDelimiter(char),

  #[error("Path {} is not valid UTF-8.", .0.display())]
  NonUtf8Path(PathBuf),

  #[error("Malformed session data: {0}")]
  Deserialization(String),

  #[error(transparent)]
  Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for TrackerError {
  fn from(err: serde_json::Error) -> TrackerError {
    TrackerError::Deserialization(err.to_string())
  }
}

pub type TrackerResult<T> = Result<T, TrackerError>;

// Accepts only finite, whole, non-negative values.
pub fn frame_number(value: f64) -> TrackerResult<FrameNumber> {
  if !value.is_finite() || value < 0. || value.fract() != 0. || value >= u64::MAX as f64 {
    return Err(TrackerError::InvalidFrame(value));
  }
  Ok(value as FrameNumber)
}

#[cfg(test)]
mod tests {
  use super::*;
  use assert_matches::assert_matches;

  #[test]
  fn test_frame_number() {
    assert_eq!(frame_number(0.).unwrap(), 0);
    assert_eq!(frame_number(42.).unwrap(), 42);
    assert_matches!(frame_number(1.5), Err(TrackerError::InvalidFrame(_)));
    assert_matches!(frame_number(-1.), Err(TrackerError::InvalidFrame(_)));
    assert_matches!(frame_number(f64::NAN), Err(TrackerError::InvalidFrame(_)));
    assert_matches!(frame_number(f64::INFINITY), Err(TrackerError::InvalidFrame(_)));
    // 2^64 does not fit and must not saturate.
    assert_matches!(frame_number(18446744073709551616.), Err(TrackerError::InvalidFrame(_)));
    assert_eq!(frame_number(9007199254740992.).unwrap(), 9007199254740992);
  }

  #[test]
  fn test_messages_name_the_offender() {
    let err = TrackerError::InvalidMeasurement("bogus".to_string());
    assert!(err.to_string().contains("bogus"));
    let err = TrackerError::UnknownFormat("xlsx".to_string());
    assert!(err.to_string().contains("xlsx"));
  }
}
