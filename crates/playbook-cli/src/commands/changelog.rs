//! `playbook changelog <OLD> <NEW>`

use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use playbook_core::changelog;

#[derive(clap::Args, Debug)]
pub struct Args {
  /// The earlier dataset version.
  pub old: PathBuf,
  /// The later dataset version.
  pub new: PathBuf,
}

/// Write the changelog between `args.old` and `args.new` to `out`.
pub fn run(args: &Args, out: &mut impl Write) -> Result<()> {
  let old = super::load(&args.old)?;
  let new = super::load(&args.new)?;
  let text = changelog::generate(&old, &new).with_context(|| {
    format!(
      "failed to reconcile {} against {}",
      args.old.display(),
      args.new.display()
    )
  })?;
  writeln!(out, "{text}").context("failed to write changelog")?;
  Ok(())
}
