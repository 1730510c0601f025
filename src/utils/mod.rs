//! Shared utilities.
//!
//! - [`email`]: SMTP delivery of one-time login codes
//! - [`errors`]: crate-wide error type and HTTP translation
//! - [`token`]: signing and verification of API credentials

pub mod email;
pub mod errors;
pub mod token;
