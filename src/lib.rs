//! # Gradebook API
//!
//! A course/grading REST API built with Rust, Axum, and PostgreSQL. There are
//! no passwords: users authenticate with a single-use 8-digit code delivered
//! by email and exchange it for a long-lived signed API credential.
//!
//! ## Authentication flow
//!
//! 1. `POST /api/auth/login` with an email. A user is created on first
//!    contact, an `EMAIL_CODE` token row is stored (valid for 10 minutes),
//!    and the code is sent out of band.
//! 2. `POST /api/auth/authenticate` with the email and code. The code is
//!    invalidated (one-time use) and a signed credential for a fresh `API`
//!    token row (valid for 12 hours) is returned in the `Authorization`
//!    response header.
//! 3. Every protected request replays the credential as a bearer token. The
//!    signature only vouches for the token row id; validity, ownership, the
//!    admin flag and the set of taught courses are read from the store on
//!    each request.
//!
//! ## Authorization
//!
//! Handlers declare guards over the per-request [`middleware::auth::AuthContext`]:
//! self-or-admin for user routes, teacher-of-course-or-admin for course
//! routes. Guards are pure predicates; everything they consult was loaded by
//! the credential validator.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── config/           # Per-concern configuration (auth, database, email, CORS)
//! ├── middleware/       # Credential validator extractor and guards
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Code issuance and redemption
//! │   ├── users/       # Minimal user CRUD (self-or-admin guarded)
//! │   └── courses/     # Minimal course CRUD (teacher/admin guarded)
//! └── utils/           # Errors, token signing, email delivery
//! ```
//!
//! Each feature module follows the same structure: `controller.rs` (HTTP
//! handlers), `service.rs` (business logic), `model.rs` (entities and DTOs),
//! `router.rs` (route wiring).

pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
