//! Development file server binary.
//!
//! Reads `devserver.toml` (or the path given with `--config`) and serves the
//! configured directory read-only over HTTP.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use playbook_devserver::ServerConfig;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Serve the playbook directory for local browsing")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "devserver.toml")]
  config: PathBuf,

  /// Directory to serve; overrides the config file.
  #[arg(long)]
  root: Option<PathBuf>,

  /// Port to listen on; overrides the config file.
  #[arg(long)]
  port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("DEVSERVER"))
    .build()
    .context("failed to read config file")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  if let Some(root) = cli.root {
    server_cfg.root = root;
  }
  if let Some(port) = cli.port {
    server_cfg.port = port;
  }

  anyhow::ensure!(
    server_cfg.root.is_dir(),
    "root {} is not a directory",
    server_cfg.root.display()
  );

  let app = playbook_devserver::router(server_cfg.root.clone());
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!(root = %server_cfg.root.display(), "Serving files");
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
