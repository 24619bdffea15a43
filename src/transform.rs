use crate::all::*;

// Maps screen pixels into the user's physical coordinate system:
// translate to the origin with y flipped up, rotate, then scale.
#[derive(Clone, Debug)]
pub struct CoordinateTransform {
  origin: Pixel,
  rotation: Matrix2d,
  ratio: f64,
}

impl CoordinateTransform {
  pub fn new(reference_frame: &ReferenceFrame, scale: &Scale) -> CoordinateTransform {
    CoordinateTransform {
      origin: reference_frame.origin,
      rotation: rotation_matrix(reference_frame.rotation),
      ratio: scale.ratio(),
    }
  }

  pub fn to_physical(&self, pixel: Pixel) -> Vector2d {
    let d = Vector2d::new(pixel[0] - self.origin[0], self.origin[1] - pixel[1]);
    self.ratio * (self.rotation * d)
  }

  pub fn to_pixel(&self, physical: Vector2d) -> Pixel {
    // Rotation matrices are orthonormal.
    let d = self.rotation.transpose() * (physical / self.ratio);
    Pixel::new(d[0] + self.origin[0], self.origin[1] - d[1])
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn transform(origin: [f64; 2], rotation: f64, pixel_length: f64, physical_length: f64) -> CoordinateTransform {
    CoordinateTransform::new(
      &ReferenceFrame::new(Pixel::new(origin[0], origin[1]), rotation),
      &Scale::new(pixel_length, physical_length, "m").unwrap(),
    )
  }

  #[test]
  fn test_identity_flips_y() {
    let t = transform([0., 0.], 0., 1., 1.);
    for &(x, y) in &[(0., 0.), (12.5, -3.), (-400., 250.25), (1e6, 1e-6)] {
      assert_eq!(t.to_physical(Pixel::new(x, y)), Vector2d::new(x, -y));
    }
  }

  #[test]
  fn test_scale_linearity() {
    let t1 = transform([30., 40.], 17., 50., 2.);
    let t2 = transform([30., 40.], 17., 50., 4.);
    for &(x, y) in &[(0., 0.), (100., 7.), (-20., 300.)] {
      let p1 = t1.to_physical(Pixel::new(x, y));
      let p2 = t2.to_physical(Pixel::new(x, y));
      assert!((2. * p1 - p2).norm() < 1e-12);
    }
  }

  #[test]
  fn test_quarter_turn() {
    let t = transform([0., 0.], 90., 1., 1.);
    let p = t.to_physical(Pixel::new(10., 0.));
    assert!((p - Vector2d::new(0., 10.)).norm() < 1e-12);
  }

  #[test]
  fn test_origin_offset() {
    let t = transform([100., 100.], 0., 1., 1.);
    assert_eq!(t.to_physical(Pixel::new(100., 100.)), Vector2d::new(0., 0.));
    assert_eq!(t.to_physical(Pixel::new(200., 100.)), Vector2d::new(100., 0.));
    assert_eq!(t.to_physical(Pixel::new(100., 60.)), Vector2d::new(0., 40.));
  }

  #[test]
  fn test_handle_lies_on_x_axis() {
    let mut frame = ReferenceFrame::new(Pixel::new(50., 50.), 0.);
    let handle = Pixel::new(80., 10.);
    frame.set_rotation_from_handle(handle);
    let t = CoordinateTransform::new(&frame, &Scale::default());
    let p = t.to_physical(handle);
    assert!((p - Vector2d::new(50., 0.)).norm() < 1e-9);
  }

  #[test]
  fn test_to_pixel_inverts() {
    let t = transform([12., -7.], -33., 80., 3.);
    let pixel = Pixel::new(321., 45.);
    assert!((t.to_pixel(t.to_physical(pixel)) - pixel).norm() < 1e-9);
  }
}
