//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::user_handler;
use crate::domain::{User, UserDetails, UserPatch, UserPayload};

/// OpenAPI documentation for the user registry
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Registry",
        version = "0.1.0",
        description = "Register, update, delete and search users by birth date",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        user_handler::create_user,
        user_handler::get_user,
        user_handler::update_user,
        user_handler::update_partial_user,
        user_handler::delete_user,
        user_handler::search_users,
    ),
    components(
        schemas(
            User,
            UserDetails,
            UserPayload,
            UserPatch,
        )
    ),
    tags(
        (name = "Users", description = "User registration and lookup")
    )
)]
pub struct ApiDoc;
