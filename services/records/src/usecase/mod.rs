pub mod allergy;
pub mod directory;
pub mod emergency;
pub mod records;
pub mod template;
