//! Whole-file JSON load and save.
//!
//! Files are read once and written in full; the handle lives only for the
//! duration of the read or the write.

use std::{
  fs,
  io::ErrorKind,
  path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::{Document, Error, Result};

/// Default indent width for rewritten files.
pub const DEFAULT_INDENT: usize = 4;

/// Read and parse a dataset file.
pub fn load(path: &Path) -> Result<Document> {
  let raw = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
  serde_json::from_str(&raw).map_err(|source| Error::Parse {
    path: path.to_path_buf(),
    source,
  })
}

/// Render a document the way dataset files are stored: pretty-printed with
/// `indent` spaces, non-ASCII left unescaped, no trailing newline.
pub fn render(document: &Document, indent: usize) -> Result<String> {
  let pad = " ".repeat(indent);
  let mut out = Vec::new();
  let mut ser =
    Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(pad.as_bytes()));
  document.serialize(&mut ser)?;
  Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Rewrite `path` with the full contents of `document`.
pub fn save(path: &Path, document: &Document, indent: usize) -> Result<()> {
  let text = render(document, indent)?;
  fs::write(path, text).map_err(|e| io_error(path, e))
}

/// List the `living_playbook*.json` files next to `main`, excluding `main`
/// itself, in sorted order.
pub fn sibling_playbooks(main: &Path) -> Result<Vec<PathBuf>> {
  let dir = match main.parent() {
    Some(p) if !p.as_os_str().is_empty() => p,
    _ => Path::new("."),
  };
  let main_name = main.file_name();
  let entries = fs::read_dir(dir).map_err(|e| io_error(dir, e))?;

  let mut found = Vec::new();
  for entry in entries {
    let entry = entry.map_err(|e| io_error(dir, e))?;
    let name = entry.file_name();
    if Some(name.as_os_str()) == main_name {
      continue;
    }
    let Some(name) = name.to_str() else { continue };
    if name.starts_with("living_playbook") && name.ends_with(".json") {
      found.push(entry.path());
    }
  }
  found.sort();
  Ok(found)
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
  if source.kind() == ErrorKind::NotFound {
    Error::NotFound(path.to_path_buf())
  } else {
    Error::Io {
      path: path.to_path_buf(),
      source,
    }
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
