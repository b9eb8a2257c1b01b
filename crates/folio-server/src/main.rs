//! `folio`: reading progress projection service.
//!
//! ```text
//! folio serve [--config folio.toml]
//! folio project --input dashboard.json [--today 2025-03-14]
//! ```
//!
//! Configuration is read from the TOML file given with `--config` (optional)
//! and `FOLIO_*` environment variables, e.g. `FOLIO_PORT=8080` or
//! `FOLIO_FROZEN_TODAY=2025-03-14`.

use std::path::PathBuf;

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use folio_core::{clock::Clock, projection::ProjectionEngine};
use folio_server::{ServerConfig, report};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Folio reading projection service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "folio.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the JSON API over HTTP.
  Serve,
  /// Project every book in a dashboard export and print the results.
  Project {
    /// JSON file shaped like the `POST /api/projections` body.
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Project as of this date instead of the configured clock.
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let config = ServerConfig::load(&cli.config)?;

  match cli.command {
    Command::Serve => serve(config).await,
    Command::Project { input, today } => {
      let today = today.unwrap_or_else(|| config.clock().today());
      let input = report::read_input(&input)?;
      tracing::debug!(books = input.books.len(), %today, "projecting export");
      let engine = ProjectionEngine::new(config.policy);
      print!("{}", report::render(&engine, &input, today)?);
      Ok(())
    }
  }
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
  let app = folio_server::app(&config);
  let address = config.address();

  if let Some(date) = config.frozen_today {
    tracing::warn!(%date, "clock frozen by configuration");
  }
  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
