//! `playbook flatten [--field NAME...] [FILE]`

use std::path::PathBuf;

use anyhow::Result;
use playbook_core::flatten::flatten_singletons;
use tracing::info;

use crate::settings::Settings;

#[derive(clap::Args, Debug, Default)]
pub struct Args {
  /// Field to flatten; repeatable. Defaults to the configured fields.
  #[arg(long = "field", value_name = "NAME")]
  pub fields: Vec<String>,

  /// Dataset to rewrite; defaults to the main dataset file.
  pub file: Option<PathBuf>,
}

/// Returns the number of values replaced.
pub fn run(args: &Args, settings: &Settings) -> Result<usize> {
  let path = args.file.clone().unwrap_or_else(|| settings.main_file.clone());
  let fields = if args.fields.is_empty() {
    &settings.flatten_fields
  } else {
    &args.fields
  };

  let mut document = super::load(&path)?;
  let replaced = flatten_singletons(&mut document, fields);
  if replaced > 0 {
    super::save(&path, &document, settings.indent)?;
  }
  info!(path = %path.display(), replaced, "flatten complete");
  Ok(replaced)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::commands::fixtures::{playbook, read, write};

  #[test]
  fn flattens_default_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
      dir.path(),
      "living_playbook.json",
      playbook(0, json!([{ "name": "Go", "gameName": ["Go"], "aliases": ["Baduk"] }])),
    );
    let args = Args {
      fields: vec![],
      file: Some(path.clone()),
    };
    assert_eq!(run(&args, &Settings::default()).unwrap(), 1);
    let games = &read(&path)["games"];
    assert_eq!(games[0]["gameName"], json!("Go"));
    assert_eq!(games[0]["aliases"], json!(["Baduk"]));
  }

  #[test]
  fn explicit_fields_replace_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
      dir.path(),
      "p.json",
      playbook(0, json!([{ "gameName": ["Go"], "aliases": ["Baduk"] }])),
    );
    let args = Args {
      fields: vec!["aliases".into()],
      file: Some(path.clone()),
    };
    assert_eq!(run(&args, &Settings::default()).unwrap(), 1);
    let games = &read(&path)["games"];
    assert_eq!(games[0]["gameName"], json!(["Go"]));
    assert_eq!(games[0]["aliases"], json!("Baduk"));
  }
}
