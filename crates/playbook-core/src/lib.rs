//! Core types and transformations for the living playbook dataset.
//!
//! This crate is deliberately free of HTTP, CLI and logging-backend
//! dependencies. Every operation works on a [`Document`] held entirely in
//! memory; loading and saving are the only points that touch the filesystem.

pub mod assign;
pub mod carry;
pub mod changelog;
pub mod error;
pub mod flatten;
pub mod io;
pub mod model;
pub mod reconcile;
pub mod sort;

pub use error::{Error, Result};
pub use model::{Document, Record, Uid, UidState, Version};
