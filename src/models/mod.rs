//! Data models for the EMT portal
//!
//! This module contains the core domain models organized by concern:
//! - Coordinate: Validated geographic positions
//! - Hospital: Directory entries that distances are resolved against
//! - Protocol: Static medical protocol reference cards

pub mod coordinate;
pub mod hospital;
pub mod protocol;

// Re-export all public types for convenient access
pub use coordinate::Coordinate;
pub use hospital::Hospital;
pub use protocol::Protocol;
