//! # Gradebook Database Crate
//!
//! This crate is the application-specific interface to the SQLite record store
//! holding students, subjects and marks.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The rest of the application works with the
//!   `core-types` records and never sees a query string.
//! - **Explicit context:** There is no global handle. Callers build a pool with
//!   `connect`, wrap it in a `DbRepository`, and pass that down.
//! - **Asynchronous & Pooled:** All operations are asynchronous over an `SqlitePool`.
//!
//! ## Public API
//!
//! - `connect`: establishes the connection pool.
//! - `run_migrations`: applies the embedded schema migrations.
//! - `DbRepository`: create, list and lookup operations for every record type.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, connect_and_migrate, run_migrations};
pub use error::DbError;
pub use repository::DbRepository;
