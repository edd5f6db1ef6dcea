//! # depot-domain
//!
//! Pure domain model for the depot device catalog.
//!
//! ## Responsibilities
//! - Foundational types: the device identifier, error conventions, timestamps
//! - Define the **Device** entity and its operational state machine
//!   (`Available`, `InUse`, `Inactive`)
//! - Contain all invariant enforcement: non-blank name/brand, the
//!   name/brand freeze while a device is in use, and the in-use delete guard
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod device;
pub mod error;
pub mod id;
pub mod time;
