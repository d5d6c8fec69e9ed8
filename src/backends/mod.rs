//! Backends module - Filesystem traversal and the output sink
//!
//! Provides:
//! - walk: Depth-first candidate walk with prune/skip policy
//! - aggregate: Record writing and token accumulation

pub mod aggregate;
pub mod walk;
