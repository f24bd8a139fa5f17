//! Shared response types for handlers.

mod response;

pub use response::{Created, NoContent};
