//! Ambient plumbing shared by MedRec services: clock, configuration loading, JSON
//! error bodies, health probes, request-id/trace layers and tracing setup.

pub mod clock;
pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
