use crate::all::*;

// Frame rates are taken as frames per second.
pub const TIME_UNIT: &str = "s";

// The closed catalogue of quantities derived for every sampled frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Measurement {
  Frame,
  Time,
  X,
  Y,
  R,
  Vx,
  Vy,
  V,
  Ax,
  Ay,
  A,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Dimension {
  Dimensionless,
  Time,
  Length,
  Velocity,
  Acceleration,
}

impl Measurement {
  pub const ALL: [Measurement; 11] = [
    Measurement::Frame,
    Measurement::Time,
    Measurement::X,
    Measurement::Y,
    Measurement::R,
    Measurement::Vx,
    Measurement::Vy,
    Measurement::V,
    Measurement::Ax,
    Measurement::Ay,
    Measurement::A,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Measurement::Frame => "frame",
      Measurement::Time => "t",
      Measurement::X => "x",
      Measurement::Y => "y",
      Measurement::R => "r",
      Measurement::Vx => "vx",
      Measurement::Vy => "vy",
      Measurement::V => "v",
      Measurement::Ax => "ax",
      Measurement::Ay => "ay",
      Measurement::A => "a",
    }
  }

  fn dimension(self) -> Dimension {
    use Measurement::*;
    match self {
      Frame => Dimension::Dimensionless,
      Time => Dimension::Time,
      X | Y | R => Dimension::Length,
      Vx | Vy | V => Dimension::Velocity,
      Ax | Ay | A => Dimension::Acceleration,
    }
  }

  // A missing length unit leaves lengths unitless but keeps the time part
  // of derivatives.
  pub fn unit(self, length_unit: Option<&str>) -> Option<String> {
    match (self.dimension(), length_unit) {
      (Dimension::Dimensionless, _) => None,
      (Dimension::Time, _) => Some(TIME_UNIT.to_string()),
      (Dimension::Length, Some(l)) => Some(l.to_string()),
      (Dimension::Length, None) => None,
      (Dimension::Velocity, l) => Some(format!("{}/{}", l.unwrap_or("1"), TIME_UNIT)),
      (Dimension::Acceleration, l) => Some(format!("{}/{}^2", l.unwrap_or("1"), TIME_UNIT)),
    }
  }

  // Values for each entry of `samples`, in the same frame order.
  pub fn evaluate(
    self,
    samples: &BTreeMap<FrameNumber, Sample>,
    calibration: &Calibration,
  ) -> Vec<Option<f64>> {
    Kinematics::new(samples, calibration).series(self)
  }
}

impl FromStr for Measurement {
  type Err = TrackerError;

  fn from_str(s: &str) -> TrackerResult<Measurement> {
    Measurement::ALL.iter()
      .copied()
      .find(|m| m.name() == s)
      .ok_or_else(|| TrackerError::InvalidMeasurement(s.to_string()))
  }
}

impl std::fmt::Display for Measurement {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

// Frame-ordered inputs shared by every derivation rule.
struct Kinematics {
  frames: Vec<FrameNumber>,
  times: Vec<f64>,
  positions: Vec<Vector2d>,
}

impl Kinematics {
  fn new(samples: &BTreeMap<FrameNumber, Sample>, calibration: &Calibration) -> Kinematics {
    let transform = calibration.transform();
    let frames: Vec<FrameNumber> = samples.keys().copied().collect();
    Kinematics {
      times: frames.iter().map(|&f| calibration.time.frame_to_time(f)).collect(),
      positions: samples.values().map(|s| transform.to_physical(s.pixel)).collect(),
      frames,
    }
  }

  fn series(&self, m: Measurement) -> Vec<Option<f64>> {
    use Measurement::*;
    match m {
      Frame => self.frames.iter().map(|&f| Some(f as f64)).collect(),
      Time => self.times.iter().map(|&t| Some(t)).collect(),
      X => self.positions.iter().map(|p| Some(p[0])).collect(),
      Y => self.positions.iter().map(|p| Some(p[1])).collect(),
      Vx => first_difference(&self.series(X), &self.times),
      Vy => first_difference(&self.series(Y), &self.times),
      Ax => first_difference(&self.series(Vx), &self.times),
      Ay => first_difference(&self.series(Vy), &self.times),
      R => self.norm(X, Y),
      V => self.norm(Vx, Vy),
      A => self.norm(Ax, Ay),
    }
  }

  fn norm(&self, a: Measurement, b: Measurement) -> Vec<Option<f64>> {
    self.series(a).into_iter()
      .zip(self.series(b))
      .map(|(a, b)| hypot_opt(a, b))
      .collect()
  }
}
