//! Error types for `playbook-core`.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::Uid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("file not found: {}", .0.display())]
  NotFound(PathBuf),

  #[error("i/o error on {}: {source}", .path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed JSON in {}: {source}", .path.display())]
  Parse {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("record {name:?} has no uid")]
  MissingUid { name: String },

  #[error("uid {uid} is shared by {first:?} and {second:?}")]
  DuplicateUid {
    uid:    Uid,
    first:  String,
    second: String,
  },

  #[error("record {name:?} has a non-integer uid: {value}")]
  InvalidUid {
    name:  String,
    value: serde_json::Value,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
