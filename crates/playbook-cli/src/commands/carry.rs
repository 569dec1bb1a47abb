//! `playbook carry-forward --old FILE [--new FILE] [--field NAME]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use playbook_core::carry::{CarryReport, carry_forward};
use tracing::info;

use crate::settings::Settings;

#[derive(clap::Args, Debug)]
pub struct Args {
  /// Snapshot holding the curated values.
  #[arg(long, value_name = "FILE")]
  pub old: PathBuf,

  /// Regenerated snapshot to update; defaults to the main dataset file.
  #[arg(long, value_name = "FILE")]
  pub new: Option<PathBuf>,

  /// Field to carry; defaults to the configured carry field.
  #[arg(long)]
  pub field: Option<String>,
}

pub fn run(args: &Args, settings: &Settings) -> Result<CarryReport> {
  let new_path = args.new.clone().unwrap_or_else(|| settings.main_file.clone());
  let field = args.field.as_deref().unwrap_or(&settings.carry_field);

  let old = super::load(&args.old)?;
  let mut new = super::load(&new_path)?;

  let report = carry_forward(&old, &mut new, field).with_context(|| {
    format!(
      "failed to carry {field} from {} into {}",
      args.old.display(),
      new_path.display()
    )
  })?;

  if report.carried > 0 {
    super::save(&new_path, &new, settings.indent)?;
  }
  info!(
    path = %new_path.display(),
    field,
    carried = report.carried,
    unmatched = report.unmatched,
    "carry-forward complete"
  );
  Ok(report)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::commands::fixtures::{playbook, read, write};

  #[test]
  fn carries_configured_field_into_main_file() {
    let dir = tempfile::tempdir().unwrap();
    let old = write(
      dir.path(),
      "living_playbook_2001.json",
      playbook(0, json!([{ "uid": 1, "name": "Go", "gameVariations": ["9x9"] }])),
    );
    let main = write(
      dir.path(),
      "living_playbook.json",
      playbook(1, json!([{ "uid": 1, "name": "Go" }, { "uid": 2, "name": "Chess" }])),
    );
    let settings = Settings {
      main_file: main.clone(),
      ..Settings::default()
    };
    let args = Args {
      old,
      new: None,
      field: None,
    };

    let report = run(&args, &settings).unwrap();
    assert_eq!(report.carried, 1);
    assert_eq!(report.unmatched, 1);
    assert_eq!(read(&main)["games"][0]["gameVariations"], json!(["9x9"]));
  }

  #[test]
  fn nothing_carried_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let old = write(dir.path(), "old.json", playbook(0, json!([{ "uid": 1 }])));
    let new = write(dir.path(), "new.json", playbook(1, json!([{ "uid": 1 }])));
    let before = std::fs::read_to_string(&new).unwrap();
    let args = Args {
      old,
      new: Some(new.clone()),
      field: Some("extra".into()),
    };
    assert_eq!(run(&args, &Settings::default()).unwrap().carried, 0);
    assert_eq!(std::fs::read_to_string(&new).unwrap(), before);
  }
}
