//! CLI interface for the zcomp binary
//!
//! This module handles command-line parsing for the spec-driven script
//! generator.

pub mod app;

// Re-export main types
pub use app::*;
