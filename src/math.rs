use crate::all::*;

// Counter-clockwise rotation by `degrees` in a y-up plane.
pub fn rotation_matrix(degrees: f64) -> Matrix2d {
  let (s, c) = degrees.to_radians().sin_cos();
  Matrix2d::new(
    c, -s,
    s, c,
  )
}

// Backward first difference of `values` with respect to `times`. Both slices
// are in frame order. The first entry has no predecessor and is `None`, as is
// any entry whose own or preceding value is `None`.
pub fn first_difference(values: &[Option<f64>], times: &[f64]) -> Vec<Option<f64>> {
  assert_eq!(values.len(), times.len());
  let mut out = Vec::with_capacity(values.len());
  for i in 0..values.len() {
    if i == 0 {
      out.push(None);
      continue;
    }
    let dt = times[i] - times[i - 1];
    let d = match (values[i - 1], values[i]) {
      (Some(v0), Some(v1)) if dt != 0. => Some((v1 - v0) / dt),
      (Some(_), Some(_)) => {
        warn!("Consecutive samples share time {}, derivative left undefined.", times[i]);
        None
      },
      _ => None,
    };
    out.push(d);
  }
  out
}

// Euclidean norm of two optional components, undefined if either is.
pub fn hypot_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
  Some(a?.hypot(b?))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_rotation_matrix() {
    let r = rotation_matrix(90.);
    let p = r * Vector2d::new(1., 0.);
    assert!((p - Vector2d::new(0., 1.)).norm() < 1e-12);
    let r = rotation_matrix(0.);
    assert_eq!(r, Matrix2d::identity());
    let p = rotation_matrix(-45.) * Vector2d::new(1., 1.);
    assert!((p - Vector2d::new(2_f64.sqrt(), 0.)).norm() < 1e-12);
  }

  #[test]
  fn test_first_difference() {
    assert!(first_difference(&[], &[]).is_empty());
    assert_eq!(first_difference(&[Some(3.)], &[0.]), vec![None]);

    let d = first_difference(&[Some(0.), Some(10.), Some(40.)], &[0., 1., 3.]);
    assert_eq!(d, vec![None, Some(10.), Some(15.)]);

    // Undefined inputs propagate, so a second derivative is undefined twice.
    let dd = first_difference(&d, &[0., 1., 3.]);
    assert_eq!(dd, vec![None, None, Some(2.5)]);

    let d = first_difference(&[Some(1.), Some(2.)], &[5., 5.]);
    assert_eq!(d, vec![None, None]);
  }

  #[test]
  fn test_hypot_opt() {
    assert_eq!(hypot_opt(Some(3.), Some(4.)), Some(5.));
    assert_eq!(hypot_opt(None, Some(4.)), None);
    assert_eq!(hypot_opt(Some(3.), None), None);
  }
}
