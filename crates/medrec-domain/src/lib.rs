//! Domain types shared across all MedRec services.
//!
//! Pure types only: no framework, database or HTTP dependencies.
//! Import in `usecase/` and `domain/` layers; `infra/` converts to and from these.

pub mod id;
pub mod medical;
pub mod pagination;
pub mod role;
pub mod streak;
