use crate::all::*;

// Everything a measurement needs besides the samples themselves. Objects are
// handed this per call instead of reaching back into their owner.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Calibration {
  pub scale: Scale,
  pub reference_frame: ReferenceFrame,
  pub time: TimeMapping,
}

impl Calibration {
  pub fn transform(&self) -> CoordinateTransform {
    CoordinateTransform::new(&self.reference_frame, &self.scale)
  }

  pub fn length_unit(&self) -> Option<&str> {
    self.scale.unit()
  }
}
