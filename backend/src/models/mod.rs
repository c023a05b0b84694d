//! Domain models for the FarmLink backend
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
