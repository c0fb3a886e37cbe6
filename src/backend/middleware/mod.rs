//! Middleware Module
//!
//! Request processing that runs before handlers.
//!
//! - **`identity`** - `Principal` and the identity strategy chain
//! - **`policy`** - method/path access table
//! - **`auth`** - the middleware function tying the two together

pub mod auth;
pub mod identity;
pub mod policy;

pub use auth::authenticate;
pub use identity::{
    BearerTokenStrategy, IdentityResolver, IdentityStrategy, Principal, SessionStrategy,
};
pub use policy::{Access, AccessPolicy, PathPattern, Rule};
