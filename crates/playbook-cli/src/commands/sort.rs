//! `playbook sort [FILE...]`

use std::path::PathBuf;

use anyhow::Result;
use playbook_core::sort::sort_by_name;
use tracing::info;

use crate::settings::Settings;

#[derive(clap::Args, Debug, Default)]
pub struct Args {
  /// Files to sort; defaults to the main dataset file.
  pub files: Vec<PathBuf>,
}

/// Sort each file's games by name, rewriting only files whose order changed.
/// Returns the number of files rewritten.
pub fn run(args: &Args, settings: &Settings) -> Result<usize> {
  let files = if args.files.is_empty() {
    vec![settings.main_file.clone()]
  } else {
    args.files.clone()
  };

  // Load everything first so a bad path fails before any rewrite.
  let mut documents = files
    .iter()
    .map(|path| super::load(path))
    .collect::<Result<Vec<_>>>()?;

  let mut rewritten = 0;
  for (path, document) in files.iter().zip(&mut documents) {
    if sort_by_name(document) {
      super::save(path, document, settings.indent)?;
      info!(path = %path.display(), "sorted");
      rewritten += 1;
    } else {
      info!(path = %path.display(), "already sorted");
    }
  }
  Ok(rewritten)
}
