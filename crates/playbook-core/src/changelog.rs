//! Plain-text changelog rendering.
//!
//! The layout matches the changelogs already published for the dataset, so
//! newly generated entries can be pasted alongside the old ones unchanged.

use crate::{
  Document, Result,
  model::Version,
  reconcile::{Change, Reconciliation, reconcile},
};

/// Reconcile `old` against `new` and render the changelog.
pub fn generate(old: &Document, new: &Document) -> Result<String> {
  let reconciliation = reconcile(old, new)?;
  Ok(render(&old.version, &new.version, &reconciliation))
}

/// Render an already-computed reconciliation.
pub fn render(from: &Version, to: &Version, r: &Reconciliation<'_>) -> String {
  let mut lines = vec![format!("Version {from} -> {to}")];

  if !r.added.is_empty() {
    lines.push("**Games Added**".to_string());
    lines.extend(r.added.iter().map(|(_, rec)| format!("- {}", rec.label())));
  }
  if !r.removed.is_empty() {
    lines.push("\n**Games Removed**".to_string());
    lines.extend(r.removed.iter().map(|(_, rec)| format!("- {}", rec.label())));
  }

  lines.push("\n**Games Updated**".to_string());
  for update in &r.updated {
    lines.push(format!("- {}", update.new.label()));
    lines.extend(update.changes.iter().map(|c| format!("  {}", describe(c))));
  }

  lines.join("\n")
}

/// One indented descriptor line, without the indent.
pub fn describe(change: &Change) -> String {
  match change {
    Change::FieldAdded(field) => format!("- {} Added", capitalize(field)),
    Change::FieldRemoved(field) => format!("- {} Removed", capitalize(field)),
    Change::FieldChanged(field) => format!("- {} Updated", capitalize(field)),
    Change::Renamed { from, to } => format!("- Renamed from '{from}' to '{to}'"),
  }
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(field: &str) -> String {
  let mut chars = field.chars();
  match chars.next() {
    Some(first) => first
      .to_uppercase()
      .chain(chars.flat_map(char::to_lowercase))
      .collect(),
    None => String::new(),
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
