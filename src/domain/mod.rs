//! Domain layer - Core business entities and logic
//!
//! The user record, its validation rules and the age eligibility rule.
//! Nothing here touches storage or HTTP.

pub mod eligibility;
pub mod lookup;
pub mod user;
pub mod validation;

pub use lookup::Lookup;
pub use user::{User, UserDetails, UserId, UserPatch, UserPayload};
pub use validation::{ValidationContext, ValidationErrors};
