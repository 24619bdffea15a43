use crate::all::*;

// How the player reports and steps positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackUnit {
  Frames,
  Milliseconds,
}

impl PlaybackUnit {
  pub fn as_str(self) -> &'static str {
    match self {
      PlaybackUnit::Frames => "frames",
      PlaybackUnit::Milliseconds => "ms",
    }
  }
}

impl FromStr for PlaybackUnit {
  type Err = TrackerError;

  fn from_str(s: &str) -> TrackerResult<PlaybackUnit> {
    match s {
      "frames" => Ok(PlaybackUnit::Frames),
      "ms" => Ok(PlaybackUnit::Milliseconds),
      _ => Err(TrackerError::UnknownUnit(s.to_string())),
    }
  }
}

// Step size for frame navigation, a positive whole number.
pub fn skip_amount(value: f64) -> TrackerResult<u64> {
  if !(value > 0.) {
    return Err(TrackerError::NonPositiveIncrement(value));
  }
  if !value.is_finite() || value.fract() != 0. {
    return Err(TrackerError::NonIntegerIncrement(value));
  }
  Ok(value as u64)
}

// State of the (external) video player that the engine reads and persists.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoSettings {
  pub file_path: Option<PathBuf>,
  pub unit: PlaybackUnit,
  skip_amount: u64,
  pub current_frame: FrameNumber,
}

impl Default for VideoSettings {
  fn default() -> VideoSettings {
    VideoSettings {
      file_path: None,
      unit: PlaybackUnit::Frames,
      skip_amount: 1,
      current_frame: 0,
    }
  }
}

impl VideoSettings {
  pub fn skip_amount(&self) -> u64 {
    self.skip_amount
  }

  pub fn set_skip_amount(&mut self, value: f64) -> TrackerResult<()> {
    self.skip_amount = skip_amount(value)?;
    Ok(())
  }

  pub fn next_frame(&mut self) -> FrameNumber {
    self.current_frame = self.current_frame.saturating_add(self.skip_amount);
    self.current_frame
  }

  pub fn previous_frame(&mut self) -> FrameNumber {
    self.current_frame = self.current_frame.saturating_sub(self.skip_amount);
    self.current_frame
  }

  // Positions from a player running in milliseconds go through the time mapping.
  pub fn seek(&mut self, position: f64, time: &TimeMapping) -> TrackerResult<FrameNumber> {
    self.current_frame = match self.unit {
      PlaybackUnit::Frames => frame_number(position)?,
      PlaybackUnit::Milliseconds => time.time_to_frame(position / 1000.),
    };
    Ok(self.current_frame)
  }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlaySettings {
  pub magnifier_visible: bool,
  // Step to the next frame after every tracked click.
  pub auto_increment: bool,
}
