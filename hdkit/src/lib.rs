#![deny(missing_docs)]

//! Hierarchical-deterministic Bitcoin key toolkit.
//!
//! Re-exports all toolkit components for convenient single-crate usage.

pub use hdkit_primitives as primitives;
pub use hdkit_keys as keys;
