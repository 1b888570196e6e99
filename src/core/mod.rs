//! Core deterministic primitives.
//!
//! Everything in this module is designed for perfect cross-platform
//! determinism: no floats, no platform-dependent arithmetic, explicit
//! wrapping everywhere. These primitives are the compatibility anchor
//! between live games and decoded replays.

pub mod hash;
pub mod rng;

// Re-export core types
pub use hash::{element_checksum, Knomul, Ksink, Mix64, ELEMENT_CHECKSUM_SEED};
pub use rng::DeterministicRng;
