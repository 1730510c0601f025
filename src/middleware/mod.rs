//! Request-processing middleware.
//!
//! - [`auth`]: the credential validator. An [`auth::AuthContext`] extractor
//!   argument on a handler makes the route require authentication.
//! - [`guards`]: pure authorization predicates evaluated by handlers after
//!   validation.
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <credential>`.
//! 2. The extractor verifies the signature, resolves the token row, and
//!    builds the authorization context from current store state.
//! 3. The handler applies the guard(s) declared for its route.

pub mod auth;
pub mod guards;
