//! Command tree model
//!
//! This module defines the command-tree data structures that both the
//! script generator and the dynamic completion handler read: switches,
//! entry points and nested command nodes.

pub mod command;
pub mod switch;

// Re-export main types
pub use command::*;
pub use switch::*;
