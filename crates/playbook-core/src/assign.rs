//! Key assignment: bind uids onto records that only carry a name.
//!
//! This is the only place names are used to identify records. It exists to
//! migrate name-keyed snapshots onto the uids of an authoritative document;
//! every other operation keys by uid alone.

use std::{
  collections::{HashMap, HashSet},
  fmt,
};

use tracing::{debug, error, warn};

use crate::{
  Document, Result,
  model::{Record, Uid, UidState},
};

/// A secondary record whose existing uid disagrees with the authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyConflict {
  pub name:          String,
  /// Label of the document the record lives in (usually its path).
  pub document:      String,
  pub existing:      Uid,
  pub authoritative: Uid,
}

impl fmt::Display for KeyConflict {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "uid mismatch for {:?} in {}: file has {}, authority has {}",
      self.name, self.document, self.existing, self.authoritative
    )
  }
}

/// A record whose authoritative uid is already held by another record in the
/// same document. The record is left unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateClaim {
  pub name:     String,
  pub document: String,
  pub uid:      Uid,
}

impl fmt::Display for DuplicateClaim {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "uid {} for {:?} in {} is already used by another record",
      self.uid, self.name, self.document
    )
  }
}

/// Outcome of assigning keys across one secondary document.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
  /// Whether any stored value changed; only then should the file be
  /// rewritten.
  pub changed:    bool,
  /// Records that received an authoritative uid in this pass.
  pub assigned:   usize,
  /// Names left without an authoritative match.
  pub unresolved: Vec<String>,
  /// Records without a usable name.
  pub skipped:    usize,
  pub conflicts:  Vec<KeyConflict>,
  pub duplicates: Vec<DuplicateClaim>,
}

/// Name → uid bindings taken from the authoritative document.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
  by_name: HashMap<String, Uid>,
}

impl KeyIndex {
  /// Index every authority record that has both a name and a resolved uid.
  /// When a name repeats, the first record wins.
  pub fn from_document(authority: &Document) -> Result<Self> {
    let mut by_name = HashMap::new();
    for record in &authority.games {
      let Some(name) = usable_name(record) else {
        debug!("authority record without a name skipped");
        continue;
      };
      let Some(uid) = record.uid()?.resolved() else {
        debug!(name, "authority record without a uid skipped");
        continue;
      };
      if let Some(&kept) = by_name.get(name) {
        warn!(name, %kept, ignored = %uid, "duplicate name in authority");
        continue;
      }
      by_name.insert(name.to_string(), uid);
    }
    Ok(Self { by_name })
  }

  pub fn lookup(&self, name: &str) -> Option<Uid> {
    self.by_name.get(name).copied()
  }

  pub fn len(&self) -> usize { self.by_name.len() }

  pub fn is_empty(&self) -> bool { self.by_name.is_empty() }

  /// Assign uids across `document`, which is identified as `label` in
  /// conflict reports.
  ///
  /// Existing uids are never overwritten. Absent uids receive the
  /// authoritative uid, or the unresolved marker when the name is unknown.
  /// Already-unresolved uids are filled in once the authority learns the
  /// name. A uid is never handed to a second record of the same document;
  /// such a record stays unresolved and is reported in
  /// [`Assignment::duplicates`].
  ///
  /// Every uid in `document` is validated before anything is changed.
  pub fn assign(&self, label: &str, document: &mut Document) -> Result<Assignment> {
    let mut out = Assignment::default();

    let mut used: HashSet<Uid> = HashSet::new();
    for record in &document.games {
      if let UidState::Resolved(uid) = record.uid()? {
        used.insert(uid);
      }
    }

    for record in &mut document.games {
      let Some(name) = usable_name(record).map(str::to_string) else {
        out.skipped += 1;
        continue;
      };
      let authoritative = self.lookup(&name);

      match record.uid()? {
        UidState::Resolved(existing) => {
          if let Some(authoritative) = authoritative
            && authoritative != existing
          {
            let conflict = KeyConflict {
              name,
              document: label.to_string(),
              existing,
              authoritative,
            };
            error!("{conflict}");
            out.conflicts.push(conflict);
          }
        }
        state => match authoritative {
          Some(uid) if used.contains(&uid) => {
            let claim = DuplicateClaim {
              name:     name.clone(),
              document: label.to_string(),
              uid,
            };
            error!("{claim}");
            out.duplicates.push(claim);
            if state == UidState::Absent {
              record.set_uid(None);
              out.changed = true;
            }
            out.unresolved.push(name);
          }
          Some(uid) => {
            used.insert(uid);
            debug!(name = %name, %uid, "uid assigned");
            record.set_uid(Some(uid));
            out.assigned += 1;
            out.changed = true;
          }
          None => {
            if state == UidState::Absent {
              record.set_uid(None);
              out.changed = true;
            }
            out.unresolved.push(name);
          }
        },
      }
    }

    Ok(out)
  }
}

fn usable_name(record: &Record) -> Option<&str> {
  record.name().filter(|n| !n.is_empty())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
