//! Collapse one-element arrays into plain values.
//!
//! Early snapshots stored free-text fields such as `gameName` as arrays
//! holding a single string. The current format stores the string itself.

use serde_json::Value;

use crate::Document;

/// Fields flattened when the caller does not name any.
pub const DEFAULT_FIELDS: &[&str] = &["gameName", "gameDetails"];

/// In every record, replace each of `fields` that holds an array of exactly
/// one element with that element. Returns the number of values replaced.
pub fn flatten_singletons<S: AsRef<str>>(document: &mut Document, fields: &[S]) -> usize {
  let mut replaced = 0;
  for record in &mut document.games {
    for field in fields {
      let Some(slot) = record.fields.get_mut(field.as_ref()) else {
        continue;
      };
      if let Value::Array(items) = slot
        && items.len() == 1
        && let Some(only) = items.pop()
      {
        *slot = only;
        replaced += 1;
      }
    }
  }
  replaced
}
