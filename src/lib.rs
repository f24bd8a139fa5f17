//! User Registry - REST backend for user records
//!
//! Create, replace, patch, delete and birth-date search over a single
//! `User` resource, with field validation and an age requirement on
//! registration.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: User entity, validation and eligibility rules
//! - **services**: Application use cases and business logic
//! - **infra**: Database, migrations and repositories
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Start without a database
//! cargo run -- serve --in-memory
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_support;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Lookup, User, UserDetails, UserId};
pub use errors::{AppError, AppResult};
