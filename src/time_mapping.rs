use crate::all::*;

// Linear frame -> time mapping through a user-set (frame, time) anchor.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeMapping {
  frame_rate: f64,
  anchor_frame: i64,
  anchor_time: f64,
}

impl Default for TimeMapping {
  fn default() -> TimeMapping {
    TimeMapping {
      frame_rate: 1.,
      anchor_frame: 0,
      anchor_time: 0.,
    }
  }
}

impl TimeMapping {
  pub fn new(frame_rate: f64, anchor_frame: i64, anchor_time: f64) -> TrackerResult<TimeMapping> {
    let mut mapping = TimeMapping::default();
    mapping.set_frame_rate(frame_rate)?;
    mapping.set_anchor(anchor_frame, anchor_time)?;
    Ok(mapping)
  }

  pub fn frame_rate(&self) -> f64 { self.frame_rate }
  pub fn anchor_frame(&self) -> i64 { self.anchor_frame }
  pub fn anchor_time(&self) -> f64 { self.anchor_time }

  pub fn set_frame_rate(&mut self, frame_rate: f64) -> TrackerResult<()> {
    if !frame_rate.is_finite() || frame_rate <= 0. {
      return Err(TrackerError::InvalidCalibration(format!("frame rate must be positive, got {}", frame_rate)));
    }
    self.frame_rate = frame_rate;
    Ok(())
  }

  pub fn set_anchor(&mut self, anchor_frame: i64, anchor_time: f64) -> TrackerResult<()> {
    if !anchor_time.is_finite() {
      return Err(TrackerError::InvalidCalibration(format!("anchor time must be finite, got {}", anchor_time)));
    }
    self.anchor_frame = anchor_frame;
    self.anchor_time = anchor_time;
    Ok(())
  }

  pub fn frame_to_time(&self, frame: FrameNumber) -> f64 {
    (frame as f64 - self.anchor_frame as f64) / self.frame_rate + self.anchor_time
  }

  // Nearest frame for a time reported by the player, never before frame 0.
  pub fn time_to_frame(&self, time: f64) -> FrameNumber {
    let frame = (time - self.anchor_time) * self.frame_rate + self.anchor_frame as f64;
    if frame.is_nan() || frame <= 0. { 0 } else { frame.round() as FrameNumber }
  }
}
