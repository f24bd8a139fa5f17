//! Infrastructure layer - External systems integration
//!
//! Database connection, schema migrations and the user repositories.

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{MemoryUserStore, UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
