//! Carry-forward: keep a curated field alive across a regenerated snapshot.

use serde_json::Value;
use tracing::debug;

use crate::{Document, Result, model::UidState};

/// Field carried forward when the caller does not name one.
pub const DEFAULT_FIELD: &str = "gameVariations";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarryReport {
  /// New records whose field was overwritten from the old document.
  pub carried:   usize,
  /// New records with a resolved uid the old document does not have.
  pub unmatched: usize,
}

/// Copy `field` from each record of `old` into the record of `new` with the
/// same uid, wherever the old record has the field set to a non-null value.
///
/// Every lookup happens before `new` is touched, so an error (a duplicate or
/// malformed uid in either document) leaves `new` as it was. Records without
/// a resolved uid never match.
pub fn carry_forward(
  old: &Document,
  new: &mut Document,
  field: &str,
) -> Result<CarryReport> {
  let old_index = old.keyed_resolved()?;
  // Two new records sharing a uid would both receive the old value.
  new.keyed_resolved()?;
  let mut report = CarryReport::default();
  let mut carried: Vec<(usize, Value)> = Vec::new();

  for (position, record) in new.games.iter().enumerate() {
    let UidState::Resolved(uid) = record.uid()? else {
      continue;
    };
    let Some(old_record) = old_index.get(&uid) else {
      report.unmatched += 1;
      continue;
    };
    if let Some(value) = old_record.get(field).filter(|v| !v.is_null()) {
      debug!(%uid, field, "carried forward");
      carried.push((position, value.clone()));
    }
  }

  report.carried = carried.len();
  for (position, value) in carried {
    new.games[position].fields.insert(field.to_string(), value);
  }
  Ok(report)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::{Error, model::tests::doc};

  #[test]
  fn copies_field_from_matching_record() {
    let old = doc(0, vec![json!({ "uid": 1, "name": "Go", "extra": "X" })]);
    let mut new = doc(1, vec![json!({ "uid": 1, "name": "Go" })]);
    let report = carry_forward(&old, &mut new, "extra").unwrap();
    assert_eq!(report.carried, 1);
    assert_eq!(new.games[0].get("extra"), Some(&json!("X")));
  }

  #[test]
  fn old_without_field_leaves_new_unchanged() {
    let old = doc(0, vec![json!({ "uid": 1, "name": "Go" })]);
    let mut new = doc(1, vec![json!({ "uid": 1, "name": "Go", "extra": "Y" })]);
    let before = new.clone();
    let report = carry_forward(&old, &mut new, "extra").unwrap();
    assert_eq!(report.carried, 0);
    assert_eq!(new, before);
  }

  #[test]
  fn old_value_overwrites_regenerated_value() {
    let old = doc(0, vec![json!({ "uid": 1, "gameVariations": [{ "n": "Blitz" }] })]);
    let mut new = doc(1, vec![json!({ "uid": 1, "gameVariations": [] })]);
    carry_forward(&old, &mut new, DEFAULT_FIELD).unwrap();
    assert_eq!(
      new.games[0].get(DEFAULT_FIELD),
      Some(&json!([{ "n": "Blitz" }]))
    );
  }

  #[test]
  fn matches_by_uid_across_renames() {
    let old = doc(0, vec![json!({ "uid": 4, "name": "Chess", "extra": 1 })]);
    let mut new = doc(1, vec![
      json!({ "uid": 4, "name": "Chess Classic" }),
      json!({ "uid": 5, "name": "Chess" }),
      json!({ "name": "Unkeyed" }),
    ]);
    let report = carry_forward(&old, &mut new, "extra").unwrap();
    assert_eq!(report, CarryReport {
      carried:   1,
      unmatched: 1,
    });
    assert_eq!(new.games[0].get("extra"), Some(&json!(1)));
    assert_eq!(new.games[1].get("extra"), None);
  }

  #[test]
  fn malformed_new_uid_leaves_new_untouched() {
    let old = doc(0, vec![json!({ "uid": 1, "extra": 1 })]);
    let mut new = doc(1, vec![
      json!({ "uid": 1, "name": "Go" }),
      json!({ "uid": "two", "name": "Chess" }),
    ]);
    let before = new.clone();
    assert!(matches!(
      carry_forward(&old, &mut new, "extra"),
      Err(Error::InvalidUid { .. })
    ));
    assert_eq!(new, before);
  }

  #[test]
  fn duplicate_new_uid_is_rejected() {
    let old = doc(0, vec![json!({ "uid": 1, "name": "Go", "extra": "X" })]);
    let mut new = doc(1, vec![
      json!({ "uid": 1, "name": "Go" }),
      json!({ "uid": 1, "name": "Chess" }),
    ]);
    let before = new.clone();
    match carry_forward(&old, &mut new, "extra").unwrap_err() {
      Error::DuplicateUid { uid, first, second } => {
        assert_eq!(uid.0, 1);
        assert_eq!(first, "Go");
        assert_eq!(second, "Chess");
      }
      other => panic!("unexpected error: {other}"),
    }
    assert_eq!(new, before);
  }

  #[test]
  fn duplicate_old_uid_leaves_new_untouched() {
    let old = doc(0, vec![
      json!({ "uid": 1, "name": "Go", "extra": 1 }),
      json!({ "uid": 1, "name": "Baduk", "extra": 2 }),
    ]);
    let mut new = doc(1, vec![json!({ "uid": 1, "name": "Go" })]);
    let before = new.clone();
    assert!(matches!(
      carry_forward(&old, &mut new, "extra"),
      Err(Error::DuplicateUid { .. })
    ));
    assert_eq!(new, before);
  }
}
