use crate::all::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
  pub frame: FrameNumber,
  // Pixels, y grows downwards.
  pub pixel: Pixel,
}

impl Sample {
  pub fn new(frame: FrameNumber, pixel: Pixel) -> Sample {
    Sample { frame, pixel }
  }
}

// One entry of a `DataTable`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell {
  Value(f64),
  // The measurement has no value at this frame, e.g. velocity at the first sample.
  Undefined,
  // Spacer column requested with an empty name.
  Blank,
}

impl Cell {
  pub fn value(&self) -> Option<f64> {
    match self {
      Cell::Value(v) => Some(*v),
      _ => None,
    }
  }
}

impl From<Option<f64>> for Cell {
  fn from(v: Option<f64>) -> Cell {
    v.map_or(Cell::Undefined, Cell::Value)
  }
}

// Per-frame table for a list of requested columns, rows in frame order.
#[derive(Clone, Debug, PartialEq)]
pub struct DataTable {
  pub columns: Vec<String>,
  pub rows: BTreeMap<FrameNumber, Vec<Cell>>,
}

impl DataTable {
  pub fn get(&self, frame: FrameNumber, column: &str) -> Option<Cell> {
    let i = self.columns.iter().position(|c| c == column)?;
    self.rows.get(&frame).map(|row| row[i])
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrackedObject {
  name: String,
  samples: BTreeMap<FrameNumber, Sample>,
}

impl TrackedObject {
  pub fn new(name: &str) -> TrackedObject {
    TrackedObject {
      name: name.to_string(),
      samples: BTreeMap::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  // Uniqueness is checked by the registry.
  pub(crate) fn set_name(&mut self, name: &str) {
    self.name = name.to_string();
  }

  pub fn samples(&self) -> &BTreeMap<FrameNumber, Sample> {
    &self.samples
  }

  pub fn len(&self) -> usize {
    self.samples.len()
  }

  pub fn is_empty(&self) -> bool {
    self.samples.is_empty()
  }

  // Clicking the same frame twice keeps only the latest position.
  pub fn add_sample(&mut self, frame: f64, pixel_x: f64, pixel_y: f64) -> TrackerResult<()> {
    let frame = frame_number(frame)?;
    if !pixel_x.is_finite() || !pixel_y.is_finite() {
      return Err(TrackerError::InvalidPixel(pixel_x, pixel_y));
    }
    debug!("{}: sample at frame {} ({}, {})", self.name, frame, pixel_x, pixel_y);
    self.samples.insert(frame, Sample::new(frame, Pixel::new(pixel_x, pixel_y)));
    Ok(())
  }

  // The `n` highest-numbered frames, regardless of the order they were clicked in.
  pub fn last_n_samples(&self, n: usize) -> BTreeMap<FrameNumber, Pixel> {
    self.samples.iter()
      .rev()
      .take(n)
      .map(|(&frame, s)| (frame, s.pixel))
      .collect()
  }

  pub fn get_measurement(
    &self,
    measurement: Measurement,
    calibration: &Calibration,
  ) -> BTreeMap<FrameNumber, Option<f64>> {
    self.samples.keys()
      .copied()
      .zip(measurement.evaluate(&self.samples, calibration))
      .collect()
  }

  pub fn get_available_measurements(&self, calibration: &Calibration) -> Vec<(Measurement, Option<String>)> {
    Measurement::ALL.iter()
      .map(|&m| (m, m.unit(calibration.length_unit())))
      .collect()
  }

  // Empty names become spacer columns. Unknown names fail before anything is computed.
  pub fn get_data(&self, names: &[&str], calibration: &Calibration) -> TrackerResult<DataTable> {
    let kinds = names.iter()
      .map(|name| if name.is_empty() { Ok(None) } else { name.parse().map(Some) })
      .collect::<TrackerResult<Vec<Option<Measurement>>>>()?;

    let columns: Vec<Vec<Cell>> = kinds.iter()
      .map(|kind| match kind {
        Some(m) => m.evaluate(&self.samples, calibration).into_iter().map(Cell::from).collect(),
        None => vec![Cell::Blank; self.samples.len()],
      })
      .collect();

    let rows = self.samples.keys()
      .enumerate()
      .map(|(i, &frame)| (frame, columns.iter().map(|c| c[i]).collect()))
      .collect();

    Ok(DataTable {
      columns: names.iter().map(|n| n.to_string()).collect(),
      rows,
    })
  }
}
