//! # Gradebook Analytics
//!
//! The grade-point arithmetic of the system.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of the database
//!   or the web layer. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `GpaCalculator` takes a student's marks and the
//!   credit weights of the subjects they reference and produces a rounded GPA.
//!
//! ## Public API
//!
//! - `GpaCalculator`: computes the credit-weighted GPA for one student.
//! - `SubjectCredits`: subject id to credit weight lookup consumed by the calculator.
//! - `ResultRow`: one reporting row (roll number, name, class, GPA).
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{GpaCalculator, SubjectCredits, GPA_SCALE, MAX_GRADE_POINT};
pub use error::AnalyticsError;
pub use report::ResultRow;
