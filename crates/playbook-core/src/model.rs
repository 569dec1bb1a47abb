//! Dataset model: documents, records and their stable keys.
//!
//! A record is an open, insertion-ordered field map. Only two fields carry
//! meaning to the tooling: `name` (the display name) and `uid` (the stable
//! key). Everything else is opaque JSON that round-trips untouched.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Field holding a record's display name.
pub const NAME_FIELD: &str = "name";
/// Field holding a record's stable key.
pub const UID_FIELD: &str = "uid";

// ─── Keys ────────────────────────────────────────────────────────────────────

/// A stable record identifier. Never changes when the display name does.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct Uid(pub i64);

impl fmt::Display for Uid {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// What a record's `uid` field currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UidState {
  /// No `uid` field at all.
  Absent,
  /// `"uid": null`: key assignment ran but found no authoritative match.
  Unresolved,
  Resolved(Uid),
}

impl UidState {
  pub fn resolved(self) -> Option<Uid> {
    match self {
      Self::Resolved(uid) => Some(uid),
      _ => None,
    }
  }
}

// ─── Version stamp ───────────────────────────────────────────────────────────

/// Display-only version stamp of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
  pub year:  u32,
  pub major: u32,
  pub minor: u32,
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}.{}", self.year, self.major, self.minor)
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// One dataset entry (a game).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
  pub fields: Map<String, Value>,
}

impl Record {
  pub fn new(fields: Map<String, Value>) -> Self { Self { fields } }

  /// The display name, if the record has a string `name`.
  pub fn name(&self) -> Option<&str> {
    self.fields.get(NAME_FIELD).and_then(Value::as_str)
  }

  /// Name used in messages; falls back to the uid or a placeholder.
  pub fn label(&self) -> String {
    if let Some(name) = self.name() {
      return name.to_string();
    }
    match self.uid() {
      Ok(UidState::Resolved(uid)) => format!("uid {uid}"),
      _ => "<unnamed>".to_string(),
    }
  }

  pub fn uid(&self) -> Result<UidState> {
    match self.fields.get(UID_FIELD) {
      None => Ok(UidState::Absent),
      Some(Value::Null) => Ok(UidState::Unresolved),
      Some(value) => value.as_i64().map(|n| UidState::Resolved(Uid(n))).ok_or_else(
        || Error::InvalidUid {
          name:  self.name().unwrap_or("<unnamed>").to_string(),
          value: value.clone(),
        },
      ),
    }
  }

  /// Store `uid`, or the unresolved marker for `None`.
  pub fn set_uid(&mut self, uid: Option<Uid>) {
    let value = uid.map_or(Value::Null, |u| Value::from(u.0));
    self.fields.insert(UID_FIELD.to_string(), value);
  }

  pub fn get(&self, field: &str) -> Option<&Value> { self.fields.get(field) }
}

// ─── Document ────────────────────────────────────────────────────────────────

/// One versioned snapshot of the playbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
  pub version: Version,
  pub games:   Vec<Record>,
  /// Any other top-level fields, carried through rewrites verbatim.
  #[serde(flatten)]
  pub extra:   Map<String, Value>,
}

impl Document {
  pub fn new(version: Version, games: Vec<Record>) -> Self {
    Self {
      version,
      games,
      extra: Map::new(),
    }
  }

  /// Index every record by its resolved uid.
  ///
  /// Fails on the first record without a resolved uid, and on the first uid
  /// shared by two records.
  pub fn keyed(&self) -> Result<BTreeMap<Uid, &Record>> { self.index(true) }

  /// Like [`Document::keyed`], but records without a resolved uid are left
  /// out of the index instead of failing it.
  pub fn keyed_resolved(&self) -> Result<BTreeMap<Uid, &Record>> {
    self.index(false)
  }

  fn index(&self, require_uid: bool) -> Result<BTreeMap<Uid, &Record>> {
    let mut index: BTreeMap<Uid, &Record> = BTreeMap::new();
    for record in &self.games {
      let uid = match record.uid()?.resolved() {
        Some(uid) => uid,
        None if require_uid => {
          return Err(Error::MissingUid {
            name: record.label(),
          });
        }
        None => continue,
      };
      if let Some(first) = index.insert(uid, record) {
        return Err(Error::DuplicateUid {
          uid,
          first: first.label(),
          second: record.label(),
        });
      }
    }
    Ok(index)
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
  use serde_json::json;

  use super::*;

  /// Build a record from a `json!` object literal.
  pub(crate) fn record(value: Value) -> Record {
    match value {
      Value::Object(fields) => Record::new(fields),
      other => panic!("not an object: {other}"),
    }
  }

  pub(crate) fn doc(minor: u32, games: Vec<Value>) -> Document {
    Document::new(
      Version {
        year: 2024,
        major: 1,
        minor,
      },
      games.into_iter().map(record).collect(),
    )
  }

  #[test]
  fn uid_states() {
    assert_eq!(record(json!({ "name": "Go" })).uid().unwrap(), UidState::Absent);
    assert_eq!(
      record(json!({ "name": "Go", "uid": null })).uid().unwrap(),
      UidState::Unresolved
    );
    assert_eq!(
      record(json!({ "name": "Go", "uid": 7 })).uid().unwrap(),
      UidState::Resolved(Uid(7))
    );
  }

  #[test]
  fn string_uid_is_invalid() {
    let err = record(json!({ "name": "Go", "uid": "7" })).uid().unwrap_err();
    assert!(matches!(err, Error::InvalidUid { ref name, .. } if name == "Go"));
  }

  #[test]
  fn set_uid_none_writes_null() {
    let mut r = record(json!({ "name": "Go" }));
    r.set_uid(None);
    assert_eq!(r.get(UID_FIELD), Some(&Value::Null));
    r.set_uid(Some(Uid(3)));
    assert_eq!(r.get(UID_FIELD), Some(&json!(3)));
  }

  #[test]
  fn keyed_rejects_duplicates() {
    let d = doc(0, vec![
      json!({ "name": "Go", "uid": 1 }),
      json!({ "name": "Chess", "uid": 1 }),
    ]);
    match d.keyed().unwrap_err() {
      Error::DuplicateUid { uid, first, second } => {
        assert_eq!(uid, Uid(1));
        assert_eq!(first, "Go");
        assert_eq!(second, "Chess");
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn keyed_rejects_missing_uid() {
    let d = doc(0, vec![json!({ "name": "Go", "uid": null })]);
    assert!(matches!(d.keyed(), Err(Error::MissingUid { .. })));
  }

  #[test]
  fn keyed_resolved_skips_unkeyed_records() {
    let d = doc(0, vec![
      json!({ "name": "Go", "uid": 1 }),
      json!({ "name": "Chess", "uid": null }),
      json!({ "name": "Mancala" }),
    ]);
    let index = d.keyed_resolved().unwrap();
    assert_eq!(index.keys().copied().collect::<Vec<_>>(), vec![Uid(1)]);
  }

  #[test]
  fn document_preserves_unknown_top_level_fields() {
    let raw = r#"{"version":{"year":2024,"major":1,"minor":2},"games":[],"notes":"keep"}"#;
    let d: Document = serde_json::from_str(raw).unwrap();
    assert_eq!(d.version.to_string(), "2024.1.2");
    assert_eq!(d.extra.get("notes"), Some(&json!("keep")));
    let back = serde_json::to_value(&d).unwrap();
    assert_eq!(back["notes"], json!("keep"));
  }

  #[test]
  fn record_field_order_survives_round_trip() {
    let raw = r#"{"zeta":1,"name":"Go","alpha":2}"#;
    let r: Record = serde_json::from_str(raw).unwrap();
    assert_eq!(serde_json::to_string(&r).unwrap(), raw);
  }
}
