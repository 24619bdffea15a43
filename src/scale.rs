use crate::all::*;

// Pixel-to-physical calibration from a ruler dragged over the video.
#[derive(Clone, Debug, PartialEq)]
pub struct Scale {
  pixel_length: f64,
  physical_length: f64,
  // Empty means unitless.
  unit: String,
}

impl Default for Scale {
  fn default() -> Scale {
    Scale {
      pixel_length: 1.,
      physical_length: 1.,
      unit: String::new(),
    }
  }
}

impl Scale {
  pub fn new(pixel_length: f64, physical_length: f64, unit: &str) -> TrackerResult<Scale> {
    let mut scale = Scale::default();
    scale.set_pixel_length(pixel_length)?;
    scale.set_physical_length(physical_length)?;
    scale.set_unit(unit);
    Ok(scale)
  }

  // The ruler's pixel length is the distance between its two handles.
  pub fn from_endpoints(
    p1: Pixel,
    p2: Pixel,
    physical_length: f64,
    unit: &str,
  ) -> TrackerResult<Scale> {
    Scale::new((p1 - p2).norm(), physical_length, unit)
  }

  pub fn pixel_length(&self) -> f64 { self.pixel_length }
  pub fn physical_length(&self) -> f64 { self.physical_length }

  pub fn unit(&self) -> Option<&str> {
    if self.unit.is_empty() { None } else { Some(self.unit.as_str()) }
  }

  // Multiplier from origin-relative pixel offsets to physical lengths.
  pub fn ratio(&self) -> f64 {
    self.physical_length / self.pixel_length
  }

  pub fn set_pixel_length(&mut self, pixel_length: f64) -> TrackerResult<()> {
    self.pixel_length = positive(pixel_length, "pixel length")?;
    Ok(())
  }

  pub fn set_physical_length(&mut self, physical_length: f64) -> TrackerResult<()> {
    self.physical_length = positive(physical_length, "physical length")?;
    Ok(())
  }

  pub fn set_unit(&mut self, unit: &str) {
    self.unit = unit.trim().to_string();
  }

  // Commits text typed into the ruler label, e.g. "1m" or "2.5 cm".
  pub fn set_length_text(&mut self, text: &str) -> TrackerResult<()> {
    let (length, unit) = Scale::parse_length(text)?;
    self.physical_length = length;
    self.unit = unit;
    Ok(())
  }

  pub fn parse_length(text: &str) -> TrackerResult<(f64, String)> {
    let text = text.trim();
    let split = text
      .char_indices()
      .find(|&(_, c)| !(c.is_ascii_digit() || c == '.' || c == '+' || c == '-' || c == 'e' || c == 'E'))
      .map(|(i, _)| i)
      .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);
    // An exponent marker directly followed by a unit letter belongs to the unit, as in "3em".
    let (number, unit) = match number.strip_suffix(|c: char| c == 'e' || c == 'E') {
      Some(stripped) if !unit.is_empty() => (stripped, &text[stripped.len()..]),
      _ => (number, unit),
    };
    let length: f64 = number.parse()
      .map_err(|_| TrackerError::InvalidCalibration(format!("cannot read a length from `{}`", text)))?;
    let length = positive(length, "physical length")?;
    Ok((length, unit.trim().to_string()))
  }
}

fn positive(value: f64, what: &str) -> TrackerResult<f64> {
  if !value.is_finite() || value <= 0. {
    return Err(TrackerError::InvalidCalibration(format!("{} must be positive, got {}", what, value)));
  }
  Ok(value)
}
