pub fn format_log(
  buf: &mut env_logger::fmt::Formatter,
  record: &log::Record,
) -> std::io::Result<()> {
  use std::io::Write;
  let mut style = buf.style();
  use env_logger::fmt::Color::*;
  use log::Level::*;
  style.set_color(match record.level() {
    Error => Red,
    Warn => Yellow,
    Info => Green,
    Debug => Magenta,
    Trace => Blue,
  });

  let s = format!("{:5} {:24}{}",
    record.level(),
    record.module_path().unwrap_or("?").trim_start_matches("motion_tracker::"),
    record.args()
  );
  writeln!(buf, "{}", style.value(s))
}

// Numbers for terminal tables. Undefined values print as a dash.
pub fn format_value(v: Option<f64>) -> String {
  match v {
    Some(v) => format!("{:.6}", v).trim_end_matches('0').trim_end_matches('.').to_string(),
    None => "-".to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_value() {
    assert_eq!(format_value(Some(1.)), "1");
    assert_eq!(format_value(Some(0.25)), "0.25");
    assert_eq!(format_value(Some(-3.1234567)), "-3.123457");
    assert_eq!(format_value(None), "-");
  }
}
