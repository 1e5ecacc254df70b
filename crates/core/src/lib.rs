//! Investment Goals Core - Domain entities, validation, services, and traits.
//!
//! This crate contains the business logic of the investment goals service.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod errors;
pub mod goals;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
