//! # Domain Models
//!
//! Pure types shared by the configuration, injection and factory crates, with minimal
//! dependencies (`serde`, `bitflags`). Keep it lean: no I/O, no locking, no lookups.

pub mod scope;
pub mod settings;
