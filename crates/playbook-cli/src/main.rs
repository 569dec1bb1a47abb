//! `playbook` — maintenance tools for the living playbook dataset.
//!
//! # Usage
//!
//! ```
//! playbook changelog src/living_playbook_2001.json src/living_playbook.json
//! playbook assign-uids
//! playbook sort src/living_playbook.json src/living_playbook_2001.json
//! playbook carry-forward --old src/living_playbook_2001.json
//! playbook flatten --field gameName
//! ```
//!
//! Logs go to stderr so that `changelog` output can be redirected cleanly.

mod commands;
mod settings;

use std::{io, path::PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{assign, carry, changelog, flatten, sort};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "playbook", version, about = "Living playbook dataset tools")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, global = true, default_value = "playbook.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Print the changelog between two dataset versions.
  Changelog(changelog::Args),
  /// Give records in secondary datasets the uids of the main dataset.
  AssignUids(assign::Args),
  /// Sort games by name.
  Sort(sort::Args),
  /// Copy one field from an older snapshot into a newer one, matched by uid.
  CarryForward(carry::Args),
  /// Replace one-element arrays in the given fields with their element.
  Flatten(flatten::Args),
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  match &cli.command {
    Command::Changelog(args) => changelog::run(args, &mut io::stdout().lock())?,
    Command::AssignUids(args) => {
      let summary = assign::run(args, &settings)?;
      tracing::info!(
        rewritten = summary.rewritten,
        conflicts = summary.conflicts,
        "uid assignment complete"
      );
    }
    Command::Sort(args) => {
      sort::run(args, &settings)?;
    }
    Command::CarryForward(args) => {
      carry::run(args, &settings)?;
    }
    Command::Flatten(args) => {
      flatten::run(args, &settings)?;
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn cli_definition_is_valid() { Cli::command().debug_assert(); }

  #[test]
  fn changelog_requires_exactly_two_paths() {
    assert!(Cli::try_parse_from(["playbook", "changelog", "a.json"]).is_err());
    assert!(
      Cli::try_parse_from(["playbook", "changelog", "a.json", "b.json", "c.json"])
        .is_err()
    );
    let cli = Cli::try_parse_from(["playbook", "changelog", "a.json", "b.json"])
      .unwrap();
    assert!(matches!(cli.command, Command::Changelog(_)));
  }

  #[test]
  fn flatten_field_is_repeatable() {
    let cli = Cli::try_parse_from([
      "playbook", "flatten", "--field", "gameName", "--field", "aliases", "x.json",
    ])
    .unwrap();
    let Command::Flatten(args) = cli.command else {
      panic!("expected flatten");
    };
    assert_eq!(args.fields, vec!["gameName", "aliases"]);
    assert_eq!(args.file, Some(PathBuf::from("x.json")));
  }
}
