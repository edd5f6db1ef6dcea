//! # depot-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** that storage adapters must implement:
//!   `DeviceRepository` — CRUD plus brand/state filters for devices
//! - Provide the **use-case layer** as a service struct:
//!   `DeviceService` — create, get, list, filter, replace, patch, delete
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `depot-domain` only. Never imports adapter crates. Adapters
//! depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
