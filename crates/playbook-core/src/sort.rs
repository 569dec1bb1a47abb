//! Canonical record ordering, so raw-file diffs stay small across edits.

use crate::Document;

/// Stable sort of `games` by display name.
///
/// Records without a string name go first, in their original relative
/// order. Returns whether the order changed.
pub fn sort_by_name(document: &mut Document) -> bool {
  let sorted = document
    .games
    .windows(2)
    .all(|pair| pair[0].name() <= pair[1].name());
  if sorted {
    return false;
  }
  // `Option<&str>` orders `None` before every `Some`.
  document.games.sort_by(|a, b| a.name().cmp(&b.name()));
  true
}
