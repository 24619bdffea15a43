use crate::all::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
  // Comma separated values.
  Csv,
}

impl ExportFormat {
  pub fn delimiter(self) -> char {
    match self {
      ExportFormat::Csv => ',',
    }
  }
}

// Exported numbers are written with digits, `.` and `-`, so none of those can
// separate them. Quotes and line breaks are taken by the quoting rules.
pub fn check_delimiter(delimiter: char) -> TrackerResult<char> {
  if delimiter.is_ascii_digit() || ".-\"\r\n".contains(delimiter) {
    return Err(TrackerError::InvalidDelimiter(delimiter));
  }
  Ok(delimiter)
}

impl FromStr for ExportFormat {
  type Err = TrackerError;

  fn from_str(s: &str) -> TrackerResult<ExportFormat> {
    match s.to_ascii_lowercase().as_str() {
      "csv" => Ok(ExportFormat::Csv),
      _ => Err(TrackerError::UnknownFormat(s.to_string())),
    }
  }
}

// Sparse multi-object table: one row per frame touched by any series.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportTable {
  pub headers: Vec<String>,
  pub rows: Vec<(FrameNumber, Vec<Option<f64>>)>,
}

pub fn export_header(measurement: Measurement, object: &str, unit: Option<&str>) -> String {
  match unit {
    Some(unit) => format!("{} ({}) [{}]", measurement, object, unit),
    None => format!("{} ({})", measurement, object),
  }
}

// Quote values containing the delimiter, quotes or newlines.
fn escape(value: &str, delimiter: char) -> String {
  if value.contains(delimiter) || value.contains('"') || value.contains('\n') {
    format!("\"{}\"", value.replace('"', "\"\""))
  }
  else {
    value.to_string()
  }
}

impl ExportTable {
  pub fn to_delimited(&self, delimiter: char) -> String {
    let sep = delimiter.to_string();
    let mut lines = Vec::with_capacity(self.rows.len() + 1);
    lines.push(self.headers.iter()
      .map(|h| escape(h, delimiter))
      .collect::<Vec<_>>()
      .join(&sep));
    for (_, cells) in &self.rows {
      lines.push(cells.iter()
        .map(|c| c.map(|v| v.to_string()).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(&sep));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
  }
}

impl ObjectRegistry {
  // `series` lists (object name, measurement name) pairs, one column each.
  pub fn build_export_table(&self, series: &[(&str, &str)]) -> TrackerResult<ExportTable> {
    let mut headers = Vec::with_capacity(series.len());
    let mut columns = Vec::with_capacity(series.len());
    for &(object, measurement) in series {
      let measurement: Measurement = measurement.parse()?;
      let values = self.get_measurement(object, measurement)?;
      headers.push(export_header(measurement, object, self.unit(measurement).as_deref()));
      columns.push(values);
    }

    let frames: BTreeSet<FrameNumber> = columns.iter()
      .flat_map(|c| c.keys().copied())
      .collect();
    let rows = frames.into_iter()
      .map(|frame| (frame, columns.iter().map(|c| c.get(&frame).copied().flatten()).collect()))
      .collect();
    Ok(ExportTable { headers, rows })
  }

  // Every measurement of every object, in registry order.
  pub fn all_series(&self) -> Vec<(String, Measurement)> {
    self.measurements_per_object().into_iter()
      .flat_map(|(object, ms)| ms.into_iter().map(move |m| (object.clone(), m)))
      .collect()
  }

  // `delimiter` replaces the format's own separator when given.
  pub fn export(
    &self,
    series: &[(&str, &str)],
    path: &Path,
    format: &str,
    delimiter: Option<char>,
  ) -> TrackerResult<()> {
    let format: ExportFormat = format.parse()?;
    let delimiter = match delimiter {
      Some(d) => check_delimiter(d)?,
      None => format.delimiter(),
    };
    let table = self.build_export_table(series)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(table.to_delimited(delimiter).as_bytes())?;
    writer.flush()?;
    info!("Exported {} series over {} frames to {}.", table.headers.len(), table.rows.len(), path.display());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use assert_matches::assert_matches;

  fn two_objects() -> ObjectRegistry {
    let calibration = Calibration {
      scale: Scale::new(1., 1., "m").unwrap(),
      ..Calibration::default()
    };
    let mut registry = ObjectRegistry::new(calibration);
    registry.create_object(Some("a")).unwrap();
    registry.track_point(1., 0., 0.).unwrap();
    registry.track_point(2., 0., 5.).unwrap();
    registry.create_object(Some("b")).unwrap();
    registry.set_current("b").unwrap();
    registry.track_point(3., 0., 5.).unwrap();
    registry.track_point(4., 0., 9.).unwrap();
    registry
  }

  #[test]
  fn test_sparse_table() {
    let registry = two_objects();
    let table = registry.build_export_table(&[("a", "x"), ("b", "x")]).unwrap();
    assert_eq!(table.headers, vec!["x (a) [m]", "x (b) [m]"]);
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[0], (0, vec![Some(1.), None]));
    assert_eq!(table.rows[1], (5, vec![Some(2.), Some(3.)]));
    assert_eq!(table.rows[2], (9, vec![None, Some(4.)]));
    assert_eq!(table.to_delimited(','), "x (a) [m],x (b) [m]\n1,\n2,3\n,4\n");
  }

  #[test]
  fn test_unitless_header() {
    let registry = two_objects();
    let table = registry.build_export_table(&[("a", "frame"), ("a", "vx")]).unwrap();
    assert_eq!(table.headers, vec!["frame (a)", "vx (a) [m/s]"]);
    assert_eq!(table.rows[0].1, vec![Some(0.), None]);
  }

  #[test]
  fn test_errors() {
    let registry = two_objects();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    assert_matches!(registry.export(&[("a", "x")], &path, "xlsx", None), Err(TrackerError::UnknownFormat(f)) if f == "xlsx");
    assert!(!path.exists());
    assert_matches!(registry.build_export_table(&[("a", "bogus")]), Err(TrackerError::InvalidMeasurement(_)));
    assert_matches!(registry.build_export_table(&[("zzz", "x")]), Err(TrackerError::UnknownObject(_)));
  }

  #[test]
  fn test_export_file() {
    let registry = two_objects();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    registry.export(&[("a", "t"), ("b", "t")], &path, "CSV", None).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "t (a) [s],t (b) [s]");
    assert_eq!(lines[3], ",9");
  }

  #[test]
  fn test_export_custom_delimiter() {
    let registry = two_objects();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    registry.export(&[("a", "x"), ("b", "x")], &path, "csv", Some(';')).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "x (a) [m];x (b) [m]\n1;\n2;3\n;4\n");
    registry.export(&[("a", "x")], &path, "csv", Some('\t')).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().nth(1), Some("1"));

    let other = dir.path().join("other.csv");
    assert_matches!(registry.export(&[("a", "x")], &other, "csv", Some('.')), Err(TrackerError::InvalidDelimiter('.')));
    assert_matches!(registry.export(&[("a", "x")], &other, "csv", Some('7')), Err(TrackerError::InvalidDelimiter(_)));
    assert_matches!(registry.export(&[("a", "x")], &other, "csv", Some('"')), Err(TrackerError::InvalidDelimiter(_)));
    assert!(!other.exists());
  }

  #[test]
  fn test_escape() {
    assert_eq!(escape("x (a, b) [m]", ','), "\"x (a, b) [m]\"");
    assert_eq!(escape("say \"hi\"", ','), "\"say \"\"hi\"\"\"");
    assert_eq!(escape("plain", ','), "plain");
  }

  #[test]
  fn test_all_series() {
    let registry = two_objects();
    let series = registry.all_series();
    assert_eq!(registry.all_possible_measurements(), Measurement::ALL.to_vec());
    assert_eq!(series.len(), 2 * Measurement::ALL.len());
    assert_eq!(series[0], ("a".to_string(), Measurement::Frame));
  }
}
