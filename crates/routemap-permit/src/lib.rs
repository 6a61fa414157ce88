//! Authorizing HTTP traffic in a route-based web service.
//!
//! Assumptions:
//!
//! - your app uses JWT bearer tokens, and decides itself how tokens reach
//!   the client (a login page, for example)
//! - your framework has a request type you can implement [`CurrentUser`] on
//!
//! You must:
//!
//! - guard handlers with [`Permits`] and implement `forbidden` (and,
//!   optionally, `authenticated`) on your request type
//! - have a user object, implemented however you want
//! - generate tokens from the user object; [`token::create_timed_token`]
//!   may be helpful
//! - implement [`CurrentUser`]:
//!   - `token` by reading the credential off your request object;
//!     [`token::extract_bearer_token`] may be helpful
//!   - `authenticate` by checking the token and returning a user;
//!     [`token::validate_token`] may be helpful
//!   - `authenticated` to receive the authenticated user
//!   - `forbidden` to build your framework's 403 response
//!   - `roles` to produce the roles possessed by a user

pub mod error;
pub mod middleware;
pub mod testing;
pub mod token;
pub mod user;

pub use error::TokenError;
pub use middleware::{Permits, role_in};
pub use token::{DEFAULT_DURATION, create_timed_token, extract_bearer_token, validate_token};
pub use user::CurrentUser;
