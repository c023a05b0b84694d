//! Shared types and domain rules for the FarmLink platform
//!
//! This crate contains the weather domain model and the alert-derivation
//! rules shared between the backend and other components of the system.

pub mod evaluation;
pub mod models;

pub use evaluation::*;
pub use models::*;
