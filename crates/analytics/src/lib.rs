//! # Palmares Analytics Engine
//!
//! This crate joins students, subjects and grades to produce weighted averages,
//! class/subject/global aggregates and rankings.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   terminals or configuration sources. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `StatisticsEngine` borrows the three record
//!   collections for the duration of a query batch and never mutates them. Every
//!   query is a pure function of those collections.
//! - **Explicit Absence:** Anything that cannot be computed (unknown key, no
//!   eligible grade, zero total weight) comes back as `None` or an empty list,
//!   never as a sentinel number.
//!
//! ## Public API
//!
//! - `StatisticsEngine`: The query surface (student, class, subject and global scopes).
//! - `lookup`: The scanning helpers every query is built on.
//! - `StudentAverage`, `RankedStudent`, `SubjectTopScore`: Named query results.
//! - `StudentReport`, `ClassReport`, `SubjectReport`, `Overview`: Composite reports.
//! - `AnalyticsError`: Returned only when strict construction rejects the input.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod lookup;
pub mod ranking;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::StatisticsEngine;
pub use error::AnalyticsError;
pub use ranking::{RankedStudent, StudentAverage, SubjectTopScore};
pub use report::{
    ClassReport, LevelAverage, Overview, ReportCardLine, StudentReport, SubjectReport,
};
