//! Completion descriptors and attachment
//!
//! This module defines how one argument slot can be completed (files,
//! directories, fixed lists, or a dynamic callback into the program) and
//! the operation that binds descriptors to switches and entry points.

pub mod attach;
pub mod descriptor;

// Re-export main types
pub use attach::*;
pub use descriptor::*;
