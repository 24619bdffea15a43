use crate::all::*;

// User-placed axes over the video. `rotation` is in degrees, counter-clockwise
// in math orientation, and is applied to pixel offsets by `CoordinateTransform`.
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceFrame {
  pub origin: Pixel,
  pub rotation: f64,
}

impl Default for ReferenceFrame {
  fn default() -> ReferenceFrame {
    ReferenceFrame {
      origin: Pixel::zeros(),
      rotation: 0.,
    }
  }
}

impl ReferenceFrame {
  pub fn new(origin: Pixel, rotation: f64) -> ReferenceFrame {
    ReferenceFrame { origin, rotation }
  }

  pub fn set_origin(&mut self, origin: Pixel) -> TrackerResult<()> {
    if !origin.iter().all(|v| v.is_finite()) {
      return Err(TrackerError::InvalidCalibration(format!("origin must be finite, got ({}, {})", origin[0], origin[1])));
    }
    self.origin = origin;
    Ok(())
  }

  pub fn set_rotation(&mut self, rotation: f64) -> TrackerResult<()> {
    if !rotation.is_finite() {
      return Err(TrackerError::InvalidCalibration(format!("rotation must be finite, got {}", rotation)));
    }
    self.rotation = rotation;
    Ok(())
  }

  // Dragging the axis handle to `handle` puts the handle on the physical +x
  // axis. Returns false and keeps the rotation if the handle sits on the origin.
  pub fn set_rotation_from_handle(&mut self, handle: Pixel) -> bool {
    let d = handle - self.origin;
    let n = d.norm();
    if n == 0. || !n.is_finite() { return false }
    self.rotation = d[1].atan2(d[0]).to_degrees();
    true
  }

  // Pixel position of a point given in axis coordinates at unit scale.
  pub fn to_pixel(&self, physical: Vector2d) -> Pixel {
    CoordinateTransform::new(self, &Scale::default()).to_pixel(physical)
  }

  // Angle echoed to the user, who sees y pointing up.
  pub fn display_angle(&self) -> f64 {
    -self.rotation
  }
}
