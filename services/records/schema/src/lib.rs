//! sea-orm entities for the records service.
//!
//! `patients` and `doctors` are read-only views over tables owned by the
//! auth service; they list only the columns this service reads.

pub mod allergies;
pub mod doctors;
pub mod medical_records;
pub mod patients;
