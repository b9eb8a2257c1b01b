//! Core types and the reading progress projection engine for Folio.
//!
//! This crate is deliberately free of HTTP, storage and logging dependencies.
//! Every computation is a pure function of the supplied records and the
//! calendar date reported by a [`clock::Clock`].

pub mod book;
pub mod calendar;
pub mod clock;
pub mod error;
pub mod projection;
pub mod reading_days;
pub mod session;
pub mod summary;

pub use error::{Error, Result};
