//! SQLite storage implementation for the investment goals service.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository trait defined in `investment-goals-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - The investment goal repository
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The `core` crate and the HTTP server are database-agnostic and work with traits.
//!
//! ```text
//! core (domain)          server (http)
//!       │                      │
//!       └──────────┬───────────┘
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod goals;

// Re-export database utilities
pub use db::{
    create_pool, exec_write, get_connection, init, run_migrations, DbConnection, DbPool,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from investment-goals-core for convenience
pub use investment_goals_core::errors::{DatabaseError, Error, Result};
