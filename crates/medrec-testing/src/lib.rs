//! Test utilities for MedRec services.
//!
//! Provides gateway identity headers and a manually driven clock.
//! Use from `[dev-dependencies]` only.

pub mod auth;
pub mod clock;
