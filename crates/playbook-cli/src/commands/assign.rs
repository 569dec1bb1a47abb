//! `playbook assign-uids [--main FILE] [SECONDARY...]`

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use playbook_core::{assign::KeyIndex, io};
use tracing::{info, warn};

use crate::settings::Settings;

#[derive(clap::Args, Debug, Default)]
pub struct Args {
  /// The authoritative dataset; defaults to the configured main file.
  #[arg(long, value_name = "FILE")]
  pub main: Option<PathBuf>,

  /// Exit non-zero when any uid conflict is found.
  #[arg(long)]
  pub strict: bool,

  /// Secondary datasets. Defaults to every `living_playbook*.json` next to
  /// the main file.
  pub secondary: Vec<PathBuf>,
}

/// Totals across every secondary document of one run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
  pub rewritten: usize,
  pub conflicts: usize,
}

pub fn run(args: &Args, settings: &Settings) -> Result<Summary> {
  let main = args.main.clone().unwrap_or_else(|| settings.main_file.clone());
  let index = KeyIndex::from_document(&super::load(&main)?)
    .with_context(|| format!("failed to index {}", main.display()))?;
  info!(path = %main.display(), names = index.len(), "authority loaded");

  let secondary = if args.secondary.is_empty() {
    io::sibling_playbooks(&main)
      .with_context(|| format!("failed to list datasets next to {}", main.display()))?
  } else {
    args.secondary.clone()
  };

  let mut documents = secondary
    .iter()
    .map(|path| super::load(path))
    .collect::<Result<Vec<_>>>()?;

  // Nothing is written until every document has been assigned.
  let mut outcomes = Vec::with_capacity(documents.len());
  for (path, document) in secondary.iter().zip(&mut documents) {
    let label = path.display().to_string();
    info!(path = %label, "processing");
    let outcome = index
      .assign(&label, document)
      .with_context(|| format!("failed to assign uids in {label}"))?;
    for name in &outcome.unresolved {
      warn!(path = %label, name = %name, "no authoritative uid");
    }
    outcomes.push(outcome);
  }

  let mut summary = Summary::default();
  for ((path, document), outcome) in secondary.iter().zip(&documents).zip(&outcomes) {
    summary.conflicts += outcome.conflicts.len() + outcome.duplicates.len();
    if outcome.changed {
      super::save(path, document, settings.indent)?;
      summary.rewritten += 1;
      info!(path = %path.display(), assigned = outcome.assigned, "updated uids");
    } else {
      info!(path = %path.display(), "no changes needed");
    }
  }

  if args.strict && summary.conflicts > 0 {
    bail!("{} uid conflict(s) found", summary.conflicts);
  }
  Ok(summary)
}
