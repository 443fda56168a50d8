//! sea-orm entities for the tables owned by the auth service.

pub mod doctors;
pub mod patients;
