//! Runtime configuration and HTTP application for the `folio` binary.
//!
//! The binary either serves [`folio_api`] over HTTP or projects a dashboard
//! export once and prints it (see [`report`]).

pub mod report;

use std::{path::Path, sync::Arc};

use anyhow::Context as _;
use axum::Router;
use chrono::NaiveDate;
use folio_core::{
  clock::{Clock, FixedClock, SystemClock},
  projection::ProjectionPolicy,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `folio.toml` and `FOLIO_*`
/// environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  /// Pin "today" to a fixed date instead of the host's local date.
  pub frozen_today: Option<NaiveDate>,
  pub policy:       ProjectionPolicy,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:         "127.0.0.1".to_string(),
      port:         5280,
      frozen_today: None,
      policy:       ProjectionPolicy::default(),
    }
  }
}

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `FOLIO_*` environment
  /// variables. Nested keys use a double underscore:
  /// `FOLIO_POLICY__RATE_WINDOW_DAYS=14`.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("FOLIO")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn clock(&self) -> ConfiguredClock {
    match self.frozen_today {
      Some(date) => ConfiguredClock::Fixed(FixedClock(date)),
      None => ConfiguredClock::System(SystemClock),
    }
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// The clock selected by configuration.
#[derive(Debug, Clone, Copy)]
pub enum ConfiguredClock {
  System(SystemClock),
  Fixed(FixedClock),
}

impl Clock for ConfiguredClock {
  fn today(&self) -> NaiveDate {
    match self {
      Self::System(c) => c.today(),
      Self::Fixed(c) => c.today(),
    }
  }
}

// ─── Application ──────────────────────────────────────────────────────────────

/// Build the HTTP application: the API under `/api`, with request tracing.
pub fn app(config: &ServerConfig) -> Router {
  Router::new()
    .nest(
      "/api",
      folio_api::api_router(Arc::new(config.clock()), config.policy),
    )
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
