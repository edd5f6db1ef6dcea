//! # depot-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON REST API** for the device catalog (`/api/devices`)
//! - Map HTTP requests into application service calls (driving adapter),
//!   including the explicit request-parsing stage: body DTOs keep
//!   "absent" and "supplied-but-blank" apart, and query-string state
//!   filters are validated before any use case runs
//! - Map application results into HTTP responses and status codes
//!
//! ## Dependency rule
//! Depends on `depot-app` (for the port trait and service) and `depot-domain`
//! (for domain types used in request/response mapping). Never leaks axum
//! types into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
