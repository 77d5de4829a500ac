pub mod dataset;
pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use dataset::Dataset;
pub use enums::TieBreak;
pub use error::CoreError;
pub use structs::{Grade, Student, Subject, MAX_COEFFICIENT, MAX_NOTE, MIN_NOTE};
