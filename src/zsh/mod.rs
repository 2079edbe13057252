//! Zsh completion script generation
//!
//! Walks the command tree and emits one completion function per node in
//! zsh's `_arguments` grammar, followed by the fixed helper functions the
//! generated functions share.

pub mod helpers;
pub mod script;

// Re-export main types
pub use helpers::*;
pub use script::*;
