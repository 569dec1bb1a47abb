//! Tool settings: defaults, overridden by `playbook.toml`, overridden by
//! `PLAYBOOK_*` environment variables. Command-line flags win over all three.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use playbook_core::{carry, flatten, io::DEFAULT_INDENT};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// The authoritative dataset file, used when a command is given no path.
  pub main_file:      PathBuf,
  /// Indent width for rewritten files.
  pub indent:         usize,
  pub carry_field:    String,
  pub flatten_fields: Vec<String>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      main_file:      PathBuf::from("src/living_playbook.json"),
      indent:         DEFAULT_INDENT,
      carry_field:    carry::DEFAULT_FIELD.to_string(),
      flatten_fields: flatten::DEFAULT_FIELDS
        .iter()
        .map(|f| f.to_string())
        .collect(),
    }
  }
}

impl Settings {
  /// Layer the optional config file at `path` and the environment over the
  /// defaults.
  pub fn load(path: &Path) -> Result<Self> {
    Self::load_with(path, environment())
  }

  fn load_with(path: &Path, env: config::Environment) -> Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(env)
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}

/// `PLAYBOOK_*` variables; `PLAYBOOK_FLATTEN_FIELDS` is comma-separated.
fn environment() -> config::Environment {
  config::Environment::with_prefix("PLAYBOOK")
    .try_parsing(true)
    .list_separator(",")
    .with_list_parse_key("flatten_fields")
}
