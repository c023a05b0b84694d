//! Domain models for the FarmLink weather subsystem

mod weather;

pub use weather::*;
