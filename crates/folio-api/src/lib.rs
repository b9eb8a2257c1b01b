//! JSON REST API for Folio.
//!
//! Exposes an axum [`Router`] that computes reading projections for records
//! supplied in each request. Storage, auth and TLS are the caller's
//! responsibility; the dashboard sends the book, its status and its session
//! history and gets the projection back.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", folio_api::api_router(Arc::new(SystemClock), policy))
//! ```

pub mod dates;
pub mod error;
pub mod projections;
pub mod status;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use folio_core::{
  clock::Clock,
  projection::{ProjectionEngine, ProjectionPolicy},
};

pub use error::ApiError;

/// Shared state threaded through the handlers.
pub struct ApiState<C: Clock> {
  pub clock:  Arc<C>,
  pub engine: ProjectionEngine,
}

impl<C: Clock> Clone for ApiState<C> {
  fn clone(&self) -> Self {
    Self { clock: Arc::clone(&self.clock), engine: self.engine }
  }
}

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<C>(clock: Arc<C>, policy: ProjectionPolicy) -> Router<()>
where
  C: Clock + 'static,
{
  let state = ApiState { clock, engine: ProjectionEngine::new(policy) };

  Router::new()
    // Projections
    .route("/projection", post(projections::single::<C>))
    .route("/projections", post(projections::batch::<C>))
    // Helpers
    .route("/status/classify", post(status::classify))
    .route("/status/derive", post(status::derive))
    .route("/dates/format", get(dates::format))
    .with_state(state)
}

// ─── Router tests ─────────────────────────────────────────────────────────────
