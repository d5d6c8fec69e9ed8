//! Core module - Data model, inclusion policy and pure helpers
//!
//! This module provides:
//! - Error kinds and exit codes
//! - The extension allow-list
//! - Run state and the final summary
//! - Path and permission helpers
//! - The prune/skip/accept policy
//! - Whitespace token counting

pub mod error;
pub mod extensions;
pub mod model;
pub mod paths;
pub mod policy;
pub mod tokenizer;
