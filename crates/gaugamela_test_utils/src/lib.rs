//! # Gaugamela Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Fixture builders for catalogs, battles and sessions
//! - A recording [`Canvas`](gaugamela_core::render::Canvas)
//! - Determinism test harness
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod determinism;
pub mod fixtures;

/// Re-export proptest for convenience.
pub use proptest;
