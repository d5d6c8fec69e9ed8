//! Flows module - End-to-end runs built from core and backends
//!
//! Provides:
//! - flatten: walk a tree and concatenate it into one text file

pub mod flatten;
