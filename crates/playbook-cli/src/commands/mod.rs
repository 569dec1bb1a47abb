//! One module per subcommand. Each exposes a clap `Args` struct and a `run`
//! function that performs a single batch pass over its files.

pub mod assign;
pub mod carry;
pub mod changelog;
pub mod flatten;
pub mod sort;

use std::path::Path;

use anyhow::{Context, Result};
use playbook_core::{Document, io};

pub(crate) fn load(path: &Path) -> Result<Document> {
  io::load(path).with_context(|| format!("failed to load {}", path.display()))
}

pub(crate) fn save(path: &Path, document: &Document, indent: usize) -> Result<()> {
  io::save(path, document, indent)
    .with_context(|| format!("failed to write {}", path.display()))
}
