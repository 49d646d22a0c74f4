//! Authorization module - token verification and permission checks
//!
//! The guard splits into two stages:
//! - `BearerClaims`: extracts and verifies the bearer token (signature,
//!   issuer, audience, expiry), rejecting with a 401/403 before the handler
//!   body runs.
//! - `Claims::require`: checks the required permission tag against the
//!   token's `permissions` claim.

mod guard;
mod token;

pub use guard::BearerClaims;
pub use token::{AuthConfig, Claims};

/// Well-known permission tags, one per route+verb pair
pub mod permissions {
    pub const GET_ACTORS: &str = "get:actors";
    pub const POST_ACTORS: &str = "post:actors";
    pub const PATCH_ACTORS: &str = "patch:actors";
    pub const DELETE_ACTORS: &str = "delete:actors";

    pub const GET_MOVIES: &str = "get:movies";
    pub const POST_MOVIES: &str = "post:movies";
    pub const PATCH_MOVIES: &str = "patch:movies";
    pub const DELETE_MOVIES: &str = "delete:movies";
}

/// Well-known role names
pub mod roles {
    pub const CASTING_ASSISTANT: &str = "assistant";
    pub const CASTING_DIRECTOR: &str = "director";
    pub const EXECUTIVE_PRODUCER: &str = "producer";
}

/// Permission bundle for a role. Roles are an issuing-side concept (the token
/// minting CLI and tests); the server itself only ever checks permissions.
pub fn role_permissions(role: &str) -> Option<&'static [&'static str]> {
    use permissions::*;

    match role {
        roles::CASTING_ASSISTANT => Some(&[GET_ACTORS, GET_MOVIES]),
        roles::CASTING_DIRECTOR => Some(&[
            GET_ACTORS,
            GET_MOVIES,
            POST_ACTORS,
            PATCH_ACTORS,
            DELETE_ACTORS,
            PATCH_MOVIES,
        ]),
        roles::EXECUTIVE_PRODUCER => Some(&[
            GET_ACTORS,
            GET_MOVIES,
            POST_ACTORS,
            PATCH_ACTORS,
            DELETE_ACTORS,
            POST_MOVIES,
            PATCH_MOVIES,
            DELETE_MOVIES,
        ]),
        _ => None,
    }
}
