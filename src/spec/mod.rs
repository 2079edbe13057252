//! YAML command specs
//!
//! The zcomp binary reads a YAML description of a command tree and turns
//! it into the model the generator consumes. Dynamic descriptors need code
//! and are out of a spec file's reach; the static variants are all
//! expressible.

pub mod parse;
pub mod types;

// Re-export main types
pub use parse::*;
pub use types::*;
