use crate::all::*;

// Points of one object to draw over the video.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayPoints {
  pub name: String,
  pub points: BTreeMap<FrameNumber, Pixel>,
}

// Owns the tracked objects, the shared calibration and the selection of the
// object that receives new clicks. Objects are looked up by name everywhere.
#[derive(Clone, Debug, Default)]
pub struct ObjectRegistry {
  objects: Vec<TrackedObject>,
  current: Option<String>,
  next_sequence: usize,
  pub calibration: Calibration,
}

impl ObjectRegistry {
  pub fn new(calibration: Calibration) -> ObjectRegistry {
    ObjectRegistry {
      objects: vec![],
      current: None,
      next_sequence: 1,
      calibration,
    }
  }

  pub fn objects(&self) -> &[TrackedObject] {
    &self.objects
  }

  pub fn get_object_names(&self) -> Vec<String> {
    self.objects.iter().map(|o| o.name().to_string()).collect()
  }

  pub fn object(&self, name: &str) -> TrackerResult<&TrackedObject> {
    self.objects.iter()
      .find(|o| o.name() == name)
      .ok_or_else(|| TrackerError::UnknownObject(name.to_string()))
  }

  pub fn object_mut(&mut self, name: &str) -> TrackerResult<&mut TrackedObject> {
    self.objects.iter_mut()
      .find(|o| o.name() == name)
      .ok_or_else(|| TrackerError::UnknownObject(name.to_string()))
  }

  fn contains(&self, name: &str) -> bool {
    self.objects.iter().any(|o| o.name() == name)
  }

  fn next_free_name(&mut self) -> String {
    loop {
      // Sequence starts at 1 even for a `Default` registry.
      self.next_sequence = self.next_sequence.max(1);
      let name = format!("Object #{}", self.next_sequence);
      self.next_sequence += 1;
      if !self.contains(&name) { return name }
    }
  }

  // The first object created becomes current.
  pub fn create_object(&mut self, name: Option<&str>) -> TrackerResult<&mut TrackedObject> {
    let name = match name {
      Some(name) if self.contains(name) => return Err(TrackerError::DuplicateName(name.to_string())),
      Some(name) => name.to_string(),
      None => self.next_free_name(),
    };
    info!("Created object {}.", name);
    if self.current.is_none() {
      self.current = Some(name.clone());
    }
    self.objects.push(TrackedObject::new(&name));
    let i = self.objects.len() - 1;
    Ok(&mut self.objects[i])
  }

  pub fn rename_object(&mut self, old: &str, new: &str) -> TrackerResult<()> {
    if old == new { return self.object(old).map(|_| ()) }
    if self.contains(new) {
      return Err(TrackerError::DuplicateName(new.to_string()));
    }
    self.object_mut(old)?.set_name(new);
    if self.current.as_deref() == Some(old) {
      self.current = Some(new.to_string());
    }
    Ok(())
  }

  // If the removed object was current, the first remaining object takes over.
  pub fn remove_object(&mut self, name: &str) -> TrackerResult<TrackedObject> {
    let i = self.objects.iter()
      .position(|o| o.name() == name)
      .ok_or_else(|| TrackerError::UnknownObject(name.to_string()))?;
    let removed = self.objects.remove(i);
    if self.current.as_deref() == Some(name) {
      self.current = self.objects.first().map(|o| o.name().to_string());
    }
    info!("Removed object {}.", name);
    Ok(removed)
  }

  pub fn set_current(&mut self, name: &str) -> TrackerResult<()> {
    if !self.contains(name) {
      return Err(TrackerError::UnknownObject(name.to_string()));
    }
    self.current = Some(name.to_string());
    Ok(())
  }

  pub fn current_name(&self) -> Option<&str> {
    self.current.as_deref()
  }

  pub fn get_current(&self) -> Option<&TrackedObject> {
    let name = self.current.as_deref()?;
    self.objects.iter().find(|o| o.name() == name)
  }

  fn get_current_mut(&mut self) -> Option<&mut TrackedObject> {
    let name = self.current.as_deref()?;
    self.objects.iter_mut().find(|o| o.name() == name)
  }

  pub fn track_point(&mut self, pixel_x: f64, pixel_y: f64, frame: f64) -> TrackerResult<()> {
    self.get_current_mut()
      .ok_or(TrackerError::NoCurrentObject)?
      .add_sample(frame, pixel_x, pixel_y)
  }

  pub fn get_points_to_display(&self, n: usize) -> Vec<DisplayPoints> {
    self.objects.iter()
      .map(|o| DisplayPoints {
        name: o.name().to_string(),
        points: o.last_n_samples(n),
      })
      .collect()
  }

  // Catalogue of the current object, empty before any object exists.
  pub fn get_available_measurements(&self) -> Vec<(Measurement, Option<String>)> {
    self.get_current()
      .map(|o| o.get_available_measurements(&self.calibration))
      .unwrap_or_default()
  }

  // `None` when there is no current object.
  pub fn get_data(&self, names: &[&str]) -> TrackerResult<Option<DataTable>> {
    self.get_current()
      .map(|o| o.get_data(names, &self.calibration))
      .transpose()
  }

  pub fn get_measurement(
    &self,
    object: &str,
    measurement: Measurement,
  ) -> TrackerResult<BTreeMap<FrameNumber, Option<f64>>> {
    Ok(self.object(object)?.get_measurement(measurement, &self.calibration))
  }

  pub fn all_possible_measurements(&self) -> Vec<Measurement> {
    Measurement::ALL.to_vec()
  }

  pub fn measurements_per_object(&self) -> Vec<(String, Vec<Measurement>)> {
    self.objects.iter()
      .map(|o| (o.name().to_string(), self.all_possible_measurements()))
      .collect()
  }

  pub fn unit(&self, measurement: Measurement) -> Option<String> {
    measurement.unit(self.calibration.length_unit())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use assert_matches::assert_matches;

  #[test]
  fn test_auto_names() {
    let mut registry = ObjectRegistry::new(Calibration::default());
    assert_eq!(registry.create_object(None).unwrap().name(), "Object #1");
    registry.create_object(Some("Object #2")).unwrap();
    assert_eq!(registry.create_object(None).unwrap().name(), "Object #3");
    assert_eq!(registry.get_object_names(), vec!["Object #1", "Object #2", "Object #3"]);

    let mut registry = ObjectRegistry::default();
    assert_eq!(registry.create_object(None).unwrap().name(), "Object #1");
  }

  #[test]
  fn test_duplicate_name() {
    let mut registry = ObjectRegistry::new(Calibration::default());
    registry.create_object(Some("ball")).unwrap();
    assert_matches!(registry.create_object(Some("ball")), Err(TrackerError::DuplicateName(n)) if n == "ball");
    assert_eq!(registry.objects().len(), 1);
  }

  #[test]
  fn test_current_selection() {
    let mut registry = ObjectRegistry::new(Calibration::default());
    assert!(registry.get_current().is_none());
    assert_matches!(registry.track_point(1., 2., 0.), Err(TrackerError::NoCurrentObject));
    assert!(registry.get_data(&["t"]).unwrap().is_none());
    assert!(registry.get_available_measurements().is_empty());

    registry.create_object(Some("a")).unwrap();
    registry.create_object(Some("b")).unwrap();
    assert_eq!(registry.current_name(), Some("a"));

    registry.set_current("b").unwrap();
    registry.track_point(1., 2., 4.).unwrap();
    assert!(registry.object("a").unwrap().is_empty());
    assert_eq!(registry.object("b").unwrap().samples()[&4].pixel, Pixel::new(1., 2.));

    assert_matches!(registry.set_current("zzz"), Err(TrackerError::UnknownObject(_)));
    assert_eq!(registry.current_name(), Some("b"));
    assert_matches!(registry.track_point(1., 2., 0.5), Err(TrackerError::InvalidFrame(_)));
  }

  #[test]
  fn test_rename_and_remove() {
    let mut registry = ObjectRegistry::new(Calibration::default());
    registry.create_object(Some("a")).unwrap();
    registry.create_object(Some("b")).unwrap();
    registry.track_point(3., 3., 1.).unwrap();
    assert_matches!(registry.rename_object("a", "b"), Err(TrackerError::DuplicateName(_)));
    assert_matches!(registry.rename_object("x", "y"), Err(TrackerError::UnknownObject(_)));
    registry.rename_object("a", "ball").unwrap();
    assert_eq!(registry.current_name(), Some("ball"));
    assert_eq!(registry.get_current().unwrap().len(), 1);

    registry.remove_object("ball").unwrap();
    assert_eq!(registry.current_name(), Some("b"));
    registry.remove_object("b").unwrap();
    assert_eq!(registry.current_name(), None);
    assert_matches!(registry.remove_object("b"), Err(TrackerError::UnknownObject(_)));
  }

  #[test]
  fn test_points_to_display() {
    let mut registry = ObjectRegistry::new(Calibration::default());
    registry.create_object(Some("a")).unwrap();
    for &frame in &[4., 0., 8., 2., 6.] {
      registry.track_point(frame * 10., 5., frame).unwrap();
    }
    registry.create_object(Some("b")).unwrap();
    let points = registry.get_points_to_display(2);
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].name, "a");
    assert_eq!(points[0].points.keys().copied().collect::<Vec<_>>(), vec![6, 8]);
    assert_eq!(points[0].points[&8], Pixel::new(80., 5.));
    assert!(points[1].points.is_empty());
    // Reading is side-effect free.
    assert_eq!(registry.object("a").unwrap().len(), 5);
  }

  #[test]
  fn test_get_data_routes_to_current() {
    let mut registry = ObjectRegistry::new(Calibration::default());
    registry.create_object(Some("a")).unwrap();
    registry.track_point(0., 0., 0.).unwrap();
    registry.track_point(0., -5., 1.).unwrap();
    let data = registry.get_data(&["frame", "y", "vy"]).unwrap().unwrap();
    assert_eq!(data.get(1, "frame"), Some(Cell::Value(1.)));
    assert_eq!(data.get(1, "y"), Some(Cell::Value(5.)));
    assert_eq!(data.get(1, "vy"), Some(Cell::Value(5.)));
    assert_matches!(registry.get_data(&["bogus"]), Err(TrackerError::InvalidMeasurement(_)));
  }
}
