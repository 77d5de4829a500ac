//! # Palmares Repository Crate
//!
//! This crate reads the three record collections from a data directory of JSON
//! files and hands them to the rest of the application as a `Dataset`.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** All file-format knowledge lives here. The statistics
//!   engine only ever sees decoded records.
//! - **Read-Only:** Nothing in this crate writes to disk. Editing and saving the
//!   collections belongs to whichever application owns the data directory.
//! - **Forgiving by Default:** A missing file is an empty collection. A file that
//!   is not a JSON array, or cannot be decoded, is reported and treated as empty
//!   unless strict loading was requested.
//!
//! ## Public API
//!
//! - `open`: Checks the data directory and returns a `JsonRepository` for it.
//! - `JsonRepository`: Loads `students.json`, `subjects.json` and `grades.json`.
//! - `RepositoryError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::open;
pub use error::RepositoryError;
pub use repository::{GRADES_FILE, JsonRepository, STUDENTS_FILE, SUBJECTS_FILE};
