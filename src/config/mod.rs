//! Configuration modules for the Gradebook API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables at startup with sensible defaults:
//!
//! - [`auth`]: signing secret and token expiry windows
//! - [`cors`]: allowed CORS origins
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`email`]: SMTP settings for sending login codes

pub mod auth;
pub mod cors;
pub mod database;
pub mod email;
