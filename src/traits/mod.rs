//! Trait definitions for hardware abstraction.
//!
//! The encoder core is generic over [`QuadratureCounter`], so the same
//! unwrap logic runs against a real timer peripheral on the target and a
//! scripted [`MockCounter`](crate::hal::MockCounter) in tests.
//!
//! # Submodules
//!
//! - `hardware`: counter read trait

pub mod hardware;

pub use hardware::*;
