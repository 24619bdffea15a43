// NOTE This kind of import-all file isn't a common Rust idiom.

pub use crate::{
  calibration::*,
  error::*,
  math::*,
  measurement::*,
  parameters::*,
  reference_frame::*,
  registry::*,
  scale::*,
  session::*,
  time_mapping::*,
  tracked_object::*,
  transform::*,
  types::*,
  util::*,
  video::*,
};

pub use {
  std::{
    collections::{BTreeMap, BTreeSet},
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
    sync::Mutex,
  },
  log::{debug, info, warn, LevelFilter},
  serde::{Deserialize, Serialize},
  anyhow::{anyhow, bail, Context as AnyhowContext, Result},
};
