mod all;
mod calibration;
mod error;
mod export;
mod math;
mod measurement;
mod parameters;
mod reference_frame;
mod registry;
mod scale;
mod session;
mod time_mapping;
mod tracked_object;
mod transform;
mod types;
mod util;
mod video;

use all::*;

#[macro_use] extern crate lazy_static;
use clap::Parser;

#[derive(Parser)]
struct Args {
  /// Session file. `track` and `calibrate` create it if missing.
  session: PathBuf,
  #[clap(subcommand)]
  command: Command,
  #[clap(flatten)]
  parameters: ParameterSet,
}

#[derive(clap::Subcommand)]
enum Command {
  /// Objects, sample counts and the measurement catalogue.
  Info,
  /// Most recent points of every object.
  Points,
  /// Per-frame table of one object. Empty column names give spacer columns.
  Table {
    #[clap(long)]
    object: Option<String>,
    #[clap(long, default_value = "t,x,y")]
    columns: String,
  },
  /// Record a click at pixel (X, Y).
  Track {
    #[clap(long)]
    object: Option<String>,
    /// Frame to track at. Defaults to the current frame.
    #[clap(long)]
    frame: Option<f64>,
    /// Player position in the session's playback unit, instead of a frame.
    #[clap(long, conflicts_with = "frame")]
    position: Option<f64>,
    #[clap(allow_hyphen_values = true)]
    x: f64,
    #[clap(allow_hyphen_values = true)]
    y: f64,
  },
  /// Set the axes, ruler, time anchor and stepping.
  Calibrate {
    #[clap(long, allow_hyphen_values = true, number_of_values = 2)]
    origin: Option<Vec<f64>>,
    #[clap(long, allow_hyphen_values = true)]
    rotation: Option<f64>,
    /// Pixel point the physical +x axis should pass through.
    #[clap(long, allow_hyphen_values = true, number_of_values = 2, conflicts_with = "rotation")]
    axis_handle: Option<Vec<f64>>,
    #[clap(long)]
    pixel_length: Option<f64>,
    /// Ruler end points X1 Y1 X2 Y2 in pixels.
    #[clap(long, allow_hyphen_values = true, number_of_values = 4, conflicts_with = "pixel_length")]
    ruler: Option<Vec<f64>>,
    /// Physical ruler length with optional unit, e.g. "1.5 m".
    #[clap(long)]
    length: Option<String>,
    #[clap(long)]
    frame_rate: Option<f64>,
    #[clap(long, allow_hyphen_values = true, number_of_values = 2)]
    anchor: Option<Vec<f64>>,
    #[clap(long)]
    skip_amount: Option<f64>,
    #[clap(long, parse(try_from_str))]
    auto_increment: Option<bool>,
  },
  /// Move the current frame by the skip amount.
  Step {
    #[clap(long)]
    back: bool,
  },
  Rename {
    old: String,
    new: String,
  },
  Remove {
    name: String,
  },
  Export {
    #[clap(short, long)]
    output: PathBuf,
    #[clap(long, default_value = "csv")]
    format: String,
    /// OBJECT:MEASUREMENT, repeatable. Everything is exported if omitted.
    #[clap(long)]
    series: Vec<String>,
  },
}

fn handle_error(err: &anyhow::Error) {
  eprintln!("Error:");
  for (i, e) in err.chain().enumerate() {
    eprintln!("  {}: {}", i + 1, e);
  }
}

fn main() {
  if let Err(err) = run() {
    handle_error(&err);
    std::process::exit(1);
  }
}

fn run() -> Result<()> {
  let args = Args::parse();

  env_logger::Builder::new()
    .filter_level(args.parameters.log_level)
    .format(util::format_log)
    .init();

  {
    let mut p = PARAMETER_SET.lock().map_err(|_| anyhow!("Parameter set lock poisoned."))?;
    *p = args.parameters;
  }

  match args.command {
    Command::Info => info_command(&Session::load(&args.session)?),
    Command::Points => points_command(&Session::load(&args.session)?),
    Command::Table { object, columns } => {
      let mut session = Session::load(&args.session)?;
      table_command(&mut session, object.as_deref(), &columns)
    },
    Command::Track { object, frame, position, x, y } => {
      let mut session = load_or_create(&args.session)?;
      track_command(&mut session, object.as_deref(), frame, position, x, y)?;
      session.save(&args.session)
    },
    Command::Calibrate {
      origin, rotation, axis_handle, pixel_length, ruler, length, frame_rate, anchor, skip_amount,
      auto_increment,
    } => {
      let mut session = load_or_create(&args.session)?;
      let calibration = &mut session.registry.calibration;
      if let Some(origin) = origin {
        calibration.reference_frame.set_origin(Pixel::new(origin[0], origin[1]))?;
      }
      if let Some(rotation) = rotation {
        calibration.reference_frame.set_rotation(rotation)?;
      }
      if let Some(handle) = axis_handle {
        if !calibration.reference_frame.set_rotation_from_handle(Pixel::new(handle[0], handle[1])) {
          bail!("Axis handle ({}, {}) does not give a direction from the origin.", handle[0], handle[1]);
        }
      }
      if let Some(pixel_length) = pixel_length {
        calibration.scale.set_pixel_length(pixel_length)?;
      }
      if let Some(ruler) = ruler {
        let scale = Scale::from_endpoints(
          Pixel::new(ruler[0], ruler[1]),
          Pixel::new(ruler[2], ruler[3]),
          calibration.scale.physical_length(),
          calibration.scale.unit().unwrap_or(""),
        )?;
        calibration.scale = scale;
      }
      if let Some(length) = length {
        calibration.scale.set_length_text(&length)?;
      }
      if let Some(frame_rate) = frame_rate {
        calibration.time.set_frame_rate(frame_rate)?;
      }
      if let Some(anchor) = anchor {
        // The anchor frame may lie before the start of the video.
        if !anchor[0].is_finite() || anchor[0].fract() != 0. {
          return Err(TrackerError::InvalidFrame(anchor[0]).into());
        }
        calibration.time.set_anchor(anchor[0] as i64, anchor[1])?;
      }
      if let Some(skip_amount) = skip_amount {
        session.video.set_skip_amount(skip_amount)?;
      }
      if let Some(auto_increment) = auto_increment {
        session.overlay.auto_increment = auto_increment;
      }
      session.save(&args.session)
    },
    Command::Step { back } => {
      let mut session = Session::load(&args.session)?;
      let frame = if back { session.video.previous_frame() } else { session.video.next_frame() };
      println!("Frame {}", frame);
      session.save(&args.session)
    },
    Command::Rename { old, new } => {
      let mut session = Session::load(&args.session)?;
      session.registry.rename_object(&old, &new)?;
      session.save(&args.session)
    },
    Command::Remove { name } => {
      let mut session = Session::load(&args.session)?;
      let removed = session.registry.remove_object(&name)?;
      info!("Dropped {} samples of {}.", removed.len(), removed.name());
      session.save(&args.session)
    },
    Command::Export { output, format, series } => {
      let session = Session::load(&args.session)?;
      export_command(&session, &output, &format, &series)
    },
  }
}

fn load_or_create(path: &Path) -> Result<Session> {
  if path.exists() {
    Session::load(path)
  }
  else {
    info!("Starting a new session at {}.", path.display());
    Ok(Session::new())
  }
}

fn info_command(session: &Session) -> Result<()> {
  let registry = &session.registry;
  let calibration = &registry.calibration;
  println!("Scale: {} px = {} {}",
    calibration.scale.pixel_length(),
    calibration.scale.physical_length(),
    calibration.scale.unit().unwrap_or(""));
  let axis_point = calibration.reference_frame.to_pixel(Vector2d::new(100., 0.));
  println!("Axes: origin ({}, {}), angle {} deg, +x through ({:.1}, {:.1})",
    calibration.reference_frame.origin[0],
    calibration.reference_frame.origin[1],
    calibration.reference_frame.display_angle(),
    axis_point[0], axis_point[1]);
  println!("Time: {} frames/{}, frame {} at {} {}",
    calibration.time.frame_rate(), TIME_UNIT,
    calibration.time.anchor_frame(), calibration.time.anchor_time(), TIME_UNIT);
  for name in registry.get_object_names() {
    let object = registry.object(&name)?;
    let marker = if registry.current_name() == Some(name.as_str()) { "*" } else { " " };
    if object.is_empty() {
      println!("{} {} (no samples)", marker, name);
    }
    else {
      println!("{} {} ({} samples)", marker, name, object.len());
    }
  }
  for (measurement, unit) in registry.get_available_measurements() {
    match unit {
      Some(unit) => println!("  {} [{}]", measurement, unit),
      None => println!("  {}", measurement),
    }
  }
  Ok(())
}

fn points_command(session: &Session) -> Result<()> {
  let n = {
    let p = PARAMETER_SET.lock().map_err(|_| anyhow!("Parameter set lock poisoned."))?;
    p.points_to_display
  };
  for object in session.registry.get_points_to_display(n) {
    println!("{}", object.name);
    for (frame, pixel) in object.points {
      println!("  {:>6} {} {}", frame, pixel[0], pixel[1]);
    }
  }
  Ok(())
}

fn table_command(session: &mut Session, object: Option<&str>, columns: &str) -> Result<()> {
  if let Some(object) = object {
    session.registry.set_current(object)?;
  }
  let names: Vec<&str> = columns.split(',').map(|c| c.trim()).collect();
  let table = session.registry.get_data(&names)?
    .ok_or(TrackerError::NoCurrentObject)?;
  println!("{}", table.columns.iter().map(|c| format!("{:>12}", c)).collect::<String>());
  for &frame in table.rows.keys() {
    let line: String = table.columns.iter()
      .map(|column| match table.get(frame, column) {
        Some(Cell::Blank) | None => format!("{:>12}", ""),
        Some(cell) => format!("{:>12}", format_value(cell.value())),
      })
      .collect();
    println!("{}", line);
  }
  Ok(())
}

fn track_command(
  session: &mut Session,
  object: Option<&str>,
  frame: Option<f64>,
  position: Option<f64>,
  x: f64,
  y: f64,
) -> Result<()> {
  match object {
    Some(name) if session.registry.object(name).is_err() => {
      session.registry.create_object(Some(name))?;
      session.registry.set_current(name)?;
    },
    Some(name) => session.registry.set_current(name)?,
    None if session.registry.get_current().is_none() => {
      session.registry.create_object(None)?;
    },
    None => {},
  }
  if let Some(frame) = frame {
    session.video.current_frame = frame_number(frame)?;
  }
  if let Some(position) = position {
    let time = session.registry.calibration.time.clone();
    session.video.seek(position, &time)?;
  }
  let frame = session.video.current_frame;
  session.track_click(x, y)?;
  info!("Tracked {} at frame {}.", session.registry.current_name().unwrap_or("?"), frame);
  Ok(())
}

fn export_command(session: &Session, output: &Path, format: &str, series: &[String]) -> Result<()> {
  let pairs: Vec<(String, String)> = if series.is_empty() {
    session.registry.all_series().into_iter()
      .map(|(object, m)| (object, m.name().to_string()))
      .collect()
  }
  else {
    series.iter()
      .map(|s| {
        let (object, measurement) = s.rsplit_once(':')
          .ok_or_else(|| anyhow!("Series `{}` is not of the form OBJECT:MEASUREMENT.", s))?;
        Ok((object.to_string(), measurement.to_string()))
      })
      .collect::<Result<Vec<_>>>()?
  };
  let pairs: Vec<(&str, &str)> = pairs.iter().map(|(o, m)| (o.as_str(), m.as_str())).collect();
  let delimiter = {
    let p = PARAMETER_SET.lock().map_err(|_| anyhow!("Parameter set lock poisoned."))?;
    p.delimiter
  };
  session.registry.export(&pairs, output, format, delimiter)
    .context(format!("Export to {} failed.", output.display()))?;
  Ok(())
}
