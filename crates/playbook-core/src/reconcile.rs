//! Reconciler: two document versions → added, removed and updated records.
//!
//! Records are matched by uid only. Field values are compared with
//! `serde_json::Value` equality, which is structural all the way down.
//! Output is ordered by ascending uid so that rendering the same pair of
//! documents twice gives identical text.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
  Document, Result,
  model::{NAME_FIELD, Record, Uid},
};

/// One field-level difference between two versions of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
  FieldAdded(String),
  FieldRemoved(String),
  FieldChanged(String),
  /// The display name changed while the uid stayed put.
  Renamed { from: String, to: String },
}

/// A record present in both versions with at least one change.
#[derive(Debug, Clone)]
pub struct Update<'a> {
  pub uid:     Uid,
  pub old:     &'a Record,
  pub new:     &'a Record,
  pub changes: Vec<Change>,
}

/// The result of reconciling an old collection against a new one.
#[derive(Debug, Clone, Default)]
pub struct Reconciliation<'a> {
  pub added:   Vec<(Uid, &'a Record)>,
  pub removed: Vec<(Uid, &'a Record)>,
  pub updated: Vec<Update<'a>>,
}

impl Reconciliation<'_> {
  pub fn is_empty(&self) -> bool {
    self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
  }
}

/// Reconcile two documents by uid.
///
/// Fails if either document has a record without a resolved uid, or two
/// records sharing one.
pub fn reconcile<'a>(
  old: &'a Document,
  new: &'a Document,
) -> Result<Reconciliation<'a>> {
  let old = old.keyed()?;
  let new = new.keyed()?;
  Ok(reconcile_keyed(&old, &new))
}

/// Reconcile two already-indexed collections.
pub fn reconcile_keyed<'a>(
  old: &BTreeMap<Uid, &'a Record>,
  new: &BTreeMap<Uid, &'a Record>,
) -> Reconciliation<'a> {
  let mut result = Reconciliation::default();

  for (&uid, &new_record) in new {
    match old.get(&uid) {
      None => result.added.push((uid, new_record)),
      Some(&old_record) => {
        let changes = compare_fields(old_record, new_record);
        if !changes.is_empty() {
          result.updated.push(Update {
            uid,
            old: old_record,
            new: new_record,
            changes,
          });
        }
      }
    }
  }

  result.removed = old
    .iter()
    .filter(|(uid, _)| !new.contains_key(uid))
    .map(|(&uid, &record)| (uid, record))
    .collect();

  result
}

/// Field-level diff of two versions of the same record.
///
/// Fields of `new` come first in their own order (added, changed, renamed),
/// followed by fields only `old` has (removed).
pub fn compare_fields(old: &Record, new: &Record) -> Vec<Change> {
  let mut changes = Vec::new();

  for (field, new_value) in &new.fields {
    match old.fields.get(field) {
      None => changes.push(Change::FieldAdded(field.clone())),
      Some(old_value) if old_value != new_value => {
        changes.push(changed(field, old_value, new_value));
      }
      Some(_) => {}
    }
  }

  for field in old.fields.keys() {
    if !new.fields.contains_key(field) {
      changes.push(Change::FieldRemoved(field.clone()));
    }
  }

  changes
}

fn changed(field: &str, old: &Value, new: &Value) -> Change {
  if field == NAME_FIELD
    && let (Value::String(from), Value::String(to)) = (old, new)
  {
    return Change::Renamed {
      from: from.clone(),
      to:   to.clone(),
    };
  }
  Change::FieldChanged(field.to_string())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
