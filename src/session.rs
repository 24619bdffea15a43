use crate::all::*;

pub const SESSION_VERSION: u32 = 1;

// On-disk layout of a saved session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionDocument {
  pub version: u32,
  pub video: VideoDocument,
  pub overlay: OverlayDocument,
  pub objects: Vec<ObjectDocument>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoDocument {
  pub file_path: Option<String>,
  pub unit: String,
  pub frame_rate: f64,
  pub skip_amount: f64,
  pub frame_offset: i64,
  pub time_offset: f64,
  pub current_frame: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayDocument {
  pub reference_axes: ReferenceAxesDocument,
  pub ruler: RulerDocument,
  pub magnifying_glass: MagnifyingGlassDocument,
  pub auto_increment: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceAxesDocument {
  pub origin: [f64; 2],
  pub rotation_deg: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RulerDocument {
  pub pixel_length: f64,
  pub physical_length: f64,
  pub unit: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MagnifyingGlassDocument {
  pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectDocument {
  pub name: String,
  // JSON object keys are strings; serde_json reads them back as integers.
  pub points: BTreeMap<FrameNumber, [f64; 2]>,
}

// Engine state together with the player and overlay settings around it.
#[derive(Clone, Debug, Default)]
pub struct Session {
  pub registry: ObjectRegistry,
  pub video: VideoSettings,
  pub overlay: OverlaySettings,
}

fn malformed(err: TrackerError) -> TrackerError {
  match err {
    TrackerError::Deserialization(_) => err,
    err => TrackerError::Deserialization(err.to_string()),
  }
}

impl Session {
  pub fn new() -> Session {
    Session {
      registry: ObjectRegistry::new(Calibration::default()),
      video: VideoSettings::default(),
      overlay: OverlaySettings::default(),
    }
  }

  // A click on the video tracks the current object at the frame on screen.
  pub fn track_click(&mut self, pixel_x: f64, pixel_y: f64) -> TrackerResult<()> {
    let frame = self.video.current_frame;
    self.registry.track_point(pixel_x, pixel_y, frame as f64)?;
    if self.overlay.auto_increment {
      self.video.next_frame();
    }
    Ok(())
  }

  // Fails on a video path that JSON cannot hold verbatim.
  pub fn to_document(&self) -> TrackerResult<SessionDocument> {
    let calibration = &self.registry.calibration;
    let file_path = match &self.video.file_path {
      Some(path) => Some(path.to_str()
        .ok_or_else(|| TrackerError::NonUtf8Path(path.clone()))?
        .to_string()),
      None => None,
    };
    Ok(SessionDocument {
      version: SESSION_VERSION,
      video: VideoDocument {
        file_path,
        unit: self.video.unit.as_str().to_string(),
        frame_rate: calibration.time.frame_rate(),
        skip_amount: self.video.skip_amount() as f64,
        frame_offset: calibration.time.anchor_frame(),
        time_offset: calibration.time.anchor_time(),
        current_frame: self.video.current_frame as f64,
      },
      overlay: OverlayDocument {
        reference_axes: ReferenceAxesDocument {
          origin: [calibration.reference_frame.origin[0], calibration.reference_frame.origin[1]],
          rotation_deg: calibration.reference_frame.rotation,
        },
        ruler: RulerDocument {
          pixel_length: calibration.scale.pixel_length(),
          physical_length: calibration.scale.physical_length(),
          unit: calibration.scale.unit().unwrap_or("").to_string(),
        },
        magnifying_glass: MagnifyingGlassDocument {
          visible: self.overlay.magnifier_visible,
        },
        auto_increment: self.overlay.auto_increment,
      },
      objects: self.registry.objects().iter()
        .map(|o| ObjectDocument {
          name: o.name().to_string(),
          points: o.samples().iter()
            .map(|(&frame, s)| (frame, [s.pixel[0], s.pixel[1]]))
            .collect(),
        })
        .collect(),
    })
  }

  // Any inconsistency is reported as `Deserialization`; nothing partial is returned.
  pub fn from_document(doc: SessionDocument) -> TrackerResult<Session> {
    if doc.version > SESSION_VERSION {
      return Err(TrackerError::Deserialization(format!(
        "session version {} is newer than supported version {}", doc.version, SESSION_VERSION)));
    }
    if doc.version < SESSION_VERSION {
      warn!("Reading session version {} as version {}.", doc.version, SESSION_VERSION);
    }

    let v = &doc.video;
    let o = &doc.overlay;
    let calibration = Calibration {
      scale: Scale::new(o.ruler.pixel_length, o.ruler.physical_length, &o.ruler.unit).map_err(malformed)?,
      reference_frame: ReferenceFrame::new(
        Pixel::new(o.reference_axes.origin[0], o.reference_axes.origin[1]),
        o.reference_axes.rotation_deg,
      ),
      time: TimeMapping::new(v.frame_rate, v.frame_offset, v.time_offset).map_err(malformed)?,
    };

    let mut video = VideoSettings::default();
    video.file_path = v.file_path.as_ref().map(PathBuf::from);
    video.unit = v.unit.parse().map_err(malformed)?;
    video.current_frame = frame_number(v.current_frame).map_err(malformed)?;
    video.set_skip_amount(v.skip_amount).map_err(malformed)?;

    let mut registry = ObjectRegistry::new(calibration);
    for object in doc.objects {
      let created = registry.create_object(Some(&object.name)).map_err(malformed)?;
      for (frame, [x, y]) in object.points {
        created.add_sample(frame as f64, x, y).map_err(malformed)?;
      }
    }

    Ok(Session {
      registry,
      video,
      overlay: OverlaySettings {
        magnifier_visible: o.magnifying_glass.visible,
        auto_increment: o.auto_increment,
      },
    })
  }

  pub fn to_json(&self) -> TrackerResult<String> {
    Ok(serde_json::to_string_pretty(&self.to_document()?)?)
  }

  pub fn from_json(s: &str) -> TrackerResult<Session> {
    let doc: SessionDocument = serde_json::from_str(s)?;
    Session::from_document(doc)
  }

  pub fn save(&self, path: &Path) -> Result<()> {
    let json = self.to_json()?;
    std::fs::write(path, json)
      .context(format!("Failed to write session {}.", path.display()))?;
    info!("Saved session with {} objects to {}.", self.registry.objects().len(), path.display());
    Ok(())
  }

  pub fn load(path: &Path) -> Result<Session> {
    let s = std::fs::read_to_string(path)
      .context(format!("Failed to read file {}.", path.display()))?;
    let session = Session::from_json(&s)
      .context(format!("Failed to parse {}.", path.display()))?;
    info!("Loaded session with {} objects from {}.", session.registry.objects().len(), path.display());
    Ok(session)
  }
}
