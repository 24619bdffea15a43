use crate::all::*;

lazy_static! {
  pub static ref PARAMETER_SET: Mutex<ParameterSet> = Mutex::new(ParameterSet::default());
}

#[derive(Debug)]
#[derive(clap::Parser)]
pub struct ParameterSet {
  // Recent points drawn per object over the video.
  #[clap(long, default_value = "10")]
  pub points_to_display: usize,

  // Export column separator. The export format's own when unset.
  #[clap(long)]
  pub delimiter: Option<char>,

  // Logging.
  #[clap(long, default_value = "info")]
  pub log_level: LevelFilter,
}

impl Default for ParameterSet {
  fn default() -> ParameterSet {
    ParameterSet {
      points_to_display: 10,
      delimiter: None,
      log_level: LevelFilter::Info,
    }
  }
}
